//! Completion handling: bank the reward, then head back to the hub.

use std::sync::{Arc, Mutex};

use crate::core::CompletionNotifier;
use crate::profile::XpSink;
use crate::types::{CompletionReport, HUB_ROUTE};

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that queues routes for the frame loop to apply.
#[derive(Debug, Default)]
pub struct RouteQueue {
    pending: Mutex<Vec<String>>,
}

impl RouteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<String> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }
}

impl Navigator for RouteQueue {
    fn navigate(&self, route: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(route.to_string());
        }
    }
}

pub struct RewardsHandler<S> {
    sink: Arc<Mutex<S>>,
    navigator: Arc<dyn Navigator>,
}

impl<S> RewardsHandler<S> {
    pub fn new(sink: Arc<Mutex<S>>, navigator: Arc<dyn Navigator>) -> Self {
        Self { sink, navigator }
    }
}

impl<S: XpSink + Send> CompletionNotifier for RewardsHandler<S> {
    fn notify(&self, report: CompletionReport) {
        if report.reward_xp > 0 {
            match self.sink.lock() {
                Ok(mut sink) => match sink.add_xp(report.reward_xp) {
                    Ok(Some(total)) => log::info!(
                        "{} paid {} xp (total {total})",
                        report.game.as_str(),
                        report.reward_xp
                    ),
                    Ok(None) => {}
                    Err(err) => log::error!("failed to save xp: {err}"),
                },
                Err(_) => log::error!("xp sink lock poisoned"),
            }
        }
        self.navigator.navigate(HUB_ROUTE);
    }
}
