//! Shadow upgrade
//!
//! Parses a class's template once and clones the fragment into each host's
//! new shadow root.

use std::rc::Rc;

use weft_dom::NodeId;

use crate::component::LoadState;
use crate::error::{Result, RuntimeError};
use crate::event::{Event, Handler};
use crate::runtime::Runtime;
use crate::template::Template;

impl Runtime {
    /// Attach a shadow root to `host` and fill it from `template`
    pub fn upgrade(&mut self, host: NodeId, template: &Template) -> Result<NodeId> {
        if self.tree().shadow_root(host).is_some() {
            return Err(RuntimeError::AlreadyUpgraded(host));
        }
        let tag = self
            .instances
            .get(&host)
            .map(|i| i.tag.clone())
            .ok_or(RuntimeError::NotAComponent(host))?;

        let fragment = {
            let mut cache = self.templates.borrow_mut();
            cache.insert(&tag, template.clone());
            cache.fragment(&tag, &mut self.document.tree).unwrap_or_default()
        };

        let shadow = self.tree_mut().attach_shadow(host)?;
        for node in fragment {
            let copy = self.tree_mut().clone_node(node, true)?;
            self.tree_mut().append_child(shadow, copy)?;
        }

        if let Some(instance) = self.instances.get_mut(&host) {
            instance.shadow = Some(shadow);
        }
        self.set_state(host, LoadState::ShadowUpgraded);

        let observes = self
            .instances
            .get(&host)
            .is_some_and(|i| i.hooks.try_borrow().is_ok_and(|c| c.observes_slot_changes()));
        if observes {
            for slot in self.tree().slots(shadow) {
                let handler: Rc<Handler> = Rc::new(move |rt: &mut Runtime, ev: &mut Event| {
                    rt.with_component(host, |component, cx| component.on_slot_change(cx, ev));
                });
                self.add_disposable_listener(host, slot, "slotchange", handler)?;
            }
        }
        Ok(shadow)
    }
}
