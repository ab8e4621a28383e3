use super::error::{ResolveError, TokenError};
use super::resolver::Strategy;
use common::model::boundary::Resolution;
use log::{debug, info, warn};

/// Receives diagnostics from the boundary resolver.
///
/// The resolver swallows every failure so that callers only ever see a
/// boundary. An observer is the one place where the reason for an empty or
/// unexpected boundary can still be seen.
pub trait ResolveObserver {
    /// A source was present but could not be used.
    fn strategy_failed(&self, strategy: Strategy, err: &ResolveError);

    /// A source was absent, or present but produced no points.
    fn strategy_empty(&self, _strategy: Strategy) {}

    /// A KML coordinate token was dropped.
    fn token_rejected(&self, _token: &str, _err: &TokenError) {}

    /// Resolution finished.
    fn resolved(&self, _resolution: &Resolution) {}
}

/// Forwards resolver diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ResolveObserver for LogObserver {
    fn strategy_failed(&self, strategy: Strategy, err: &ResolveError) {
        warn!("[BOUNDARY] {} strategy failed: {}", strategy.name(), err);
    }

    fn strategy_empty(&self, strategy: Strategy) {
        debug!("[BOUNDARY] {} strategy produced no points", strategy.name());
    }

    fn token_rejected(&self, token: &str, err: &TokenError) {
        debug!("[BOUNDARY] dropped coordinate token {:?}: {}", token, err);
    }

    fn resolved(&self, resolution: &Resolution) {
        info!(
            "[BOUNDARY] resolved {} points from {:?}",
            resolution.boundary.len(),
            resolution.source
        );
    }
}

impl<O: ResolveObserver + ?Sized> ResolveObserver for &O {
    fn strategy_failed(&self, strategy: Strategy, err: &ResolveError) {
        (**self).strategy_failed(strategy, err)
    }

    fn strategy_empty(&self, strategy: Strategy) {
        (**self).strategy_empty(strategy)
    }

    fn token_rejected(&self, token: &str, err: &TokenError) {
        (**self).token_rejected(token, err)
    }

    fn resolved(&self, resolution: &Resolution) {
        (**self).resolved(resolution)
    }
}
