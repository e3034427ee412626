//! Controller resolution
//!
//! A component's controller lives on the nearest element declaring
//! `[controller]`. That element may be known before its controller is
//! attached (an outer host still loading, or a controller attached by hand),
//! so readiness is polled on the controller backoff.

use std::cell::RefCell;

use smol::Timer;
use weft_dom::NodeId;

use crate::backoff::millis;
use crate::error::{Result, RuntimeError};
use crate::runtime::Runtime;

/// Whether `waiting` should keep waiting
pub(crate) fn still_wanted(runtime: &Runtime, waiting: NodeId) -> bool {
    !runtime.config.cancel_on_disconnect || runtime.tree().is_connected(waiting)
}

/// Wait until `element` has a controller. Returns the element, not the
/// controller, so later reads go through the live object.
pub async fn wait_for_controller(runtime: &RefCell<Runtime>, waiting: NodeId, element: NodeId) -> Result<NodeId> {
    let mut delays = runtime.borrow().config.controller_retry.delays();
    let mut attempts = 0;

    loop {
        attempts += 1;
        {
            let rt = runtime.borrow();
            if rt.has_controller(element) {
                return Ok(element);
            }
            if !still_wanted(&rt, waiting) {
                return Err(RuntimeError::Cancelled(waiting));
            }
        }

        let Some(delay) = delays.next() else {
            return Err(RuntimeError::ControllerWait { element, attempts });
        };
        tracing::warn!(
            %element,
            "Element controller attribute is present but the controller does not appear to be ready; Waiting {}ms...",
            millis(delay)
        );
        Timer::after(delay).await;
    }
}

/// Nearest controller element for `host`, once its controller is ready
pub async fn resolve_nearest(runtime: &RefCell<Runtime>, host: NodeId) -> Result<Option<NodeId>> {
    let nearest = runtime.borrow().scope_of(host).nearest();
    match nearest {
        Some(element) => wait_for_controller(runtime, host, element).await.map(Some),
        None => Ok(None),
    }
}

/// Every controller element above `host`, nearest first, each one ready.
/// An ancestor whose controller never shows up is left out.
pub async fn ancestor_chain(runtime: &RefCell<Runtime>, host: NodeId) -> Result<Vec<NodeId>> {
    let elements = runtime.borrow().scope_of(host).chain();
    let mut chain = Vec::with_capacity(elements.len());
    for element in elements {
        match wait_for_controller(runtime, host, element).await {
            Ok(element) => chain.push(element),
            Err(err @ RuntimeError::ControllerWait { .. }) => {
                tracing::warn!(%host, "{}; leaving it out of the interpolation chain", err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(chain)
}
