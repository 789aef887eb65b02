use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use strum::IntoEnumIterator;

use crate::analysis::{analyze_mode, frequency::digit_frequency, window::TickWindow};
use crate::config::{AnalysisConfig, AnalysisMode, constants};
use crate::data::{ConnectionStatus, TickStreamManager};
use crate::domain::Tick;
use crate::models::{ModeReport, ScopeSnapshot};

use super::state::SessionState;

/// Owns one analysis session: the tick window, the live configuration,
/// and the latest snapshot. Single-threaded by design; ticks arrive on
/// a channel and each one is processed to completion (push + full
/// recompute) before the next is taken.
pub struct ScopeEngine {
    window: TickWindow,
    config: AnalysisConfig,
    state: SessionState,

    tick_rx: Receiver<Tick>,
    /// Public so callers (and tests) can feed ticks in directly.
    pub tick_tx: Sender<Tick>,

    stream: Option<Arc<TickStreamManager>>,
}

impl ScopeEngine {
    /// A session wired to a live tick stream for `symbol`.
    pub fn live(symbol: &str, app_id: &str) -> Self {
        let mut engine = Self::offline();

        let mut manager = TickStreamManager::new(app_id);
        manager.set_tick_sender(engine.tick_tx.clone());
        let stream = Arc::new(manager);
        stream.subscribe(symbol.to_string());

        engine.stream = Some(stream);
        engine
    }

    /// A session with no feed attached. Used for one-shot history
    /// analysis; ticks can still be pushed via `tick_tx`.
    pub fn offline() -> Self {
        let (tick_tx, tick_rx) = channel();
        Self {
            window: TickWindow::new(constants::BUFFER_CAPACITY),
            config: AnalysisConfig::default(),
            state: SessionState::default(),
            tick_rx,
            tick_tx,
            stream: None,
        }
    }

    /// Seeds the window from a one-time historical batch and builds
    /// the first snapshot.
    pub fn seed_history(&mut self, ticks: Vec<Tick>) {
        for tick in ticks {
            if tick.is_valid() {
                self.window.push(tick);
            }
        }
        self.recompute();
    }

    /// Drains pending live ticks. Every accepted tick triggers a full
    /// recompute, so the snapshot never lags the window. Returns true
    /// if anything changed.
    pub fn process_live_data(&mut self) -> bool {
        let mut updated = false;
        while let Ok(tick) = self.tick_rx.try_recv() {
            if !tick.is_valid() {
                log::warn!("Rejected malformed tick at epoch {}", tick.epoch_ms);
                self.state.last_error = Some(format!(
                    "rejected malformed quote at epoch {}",
                    tick.epoch_ms
                ));
                continue;
            }
            self.window.push(tick);
            self.recompute();
            updated = true;
        }
        updated
    }

    /// Rebuilds the snapshot from the current window tail. All derived
    /// values are recomputed from scratch; nothing survives evictions.
    fn recompute(&mut self) {
        let ticks = self.window.tail(self.config.range.size());
        let last_tick = ticks.last().copied();

        let snapshot = ScopeSnapshot {
            mode: self.config.mode,
            range: self.config.range,
            tick_count: ticks.len(),
            last_tick,
            last_digit: last_tick.map(|t| t.last_digit()),
            frequency: digit_frequency(&ticks),
            report: analyze_mode(self.config.mode, &ticks),
        };

        self.state.snapshot = Some(Arc::new(snapshot));
    }

    pub fn snapshot(&self) -> Option<Arc<ScopeSnapshot>> {
        self.state.snapshot.clone()
    }

    /// Independent reports for every mode over the same window tail.
    /// Each is a pure function of the snapshot moment, so concurrent
    /// views never interfere.
    pub fn reports_for_all_modes(&self) -> Vec<ModeReport> {
        let ticks = self.window.tail(self.config.range.size());
        AnalysisMode::iter()
            .map(|mode| analyze_mode(mode, &ticks))
            .collect()
    }

    /// Takes effect on the next recompute; the window is not reset.
    pub fn update_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    pub fn config(&self) -> AnalysisConfig {
        self.config
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.stream
            .as_ref()
            .map(|s| s.status())
            .unwrap_or(ConnectionStatus::Disconnected)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    /// Stops the live stream. Pending feed traffic is dropped and no
    /// recompute fires afterwards.
    pub fn shutdown(&self) {
        if let Some(stream) = &self.stream {
            stream.stop();
        }
    }
}

impl Drop for ScopeEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowRange;
    use crate::models::Parity;

    fn tick(i: i64, quote: f64) -> Tick {
        Tick::new(i, quote)
    }

    #[test]
    fn test_seed_builds_first_snapshot() {
        let mut engine = ScopeEngine::offline();
        engine.seed_history(vec![tick(1, 100.02), tick(2, 100.04), tick(3, 100.05)]);

        let snap = engine.snapshot().expect("snapshot after seed");
        assert_eq!(snap.tick_count, 3);
        assert_eq!(snap.last_digit, Some(5));
        assert_eq!(snap.frequency.total, 3);
    }

    #[test]
    fn test_live_ticks_recompute() {
        let mut engine = ScopeEngine::offline();
        engine.tick_tx.send(tick(1, 100.02)).unwrap();
        engine.tick_tx.send(tick(2, 100.07)).unwrap();

        assert!(engine.process_live_data());
        let snap = engine.snapshot().unwrap();
        assert_eq!(snap.tick_count, 2);
        assert_eq!(snap.last_digit, Some(7));

        // Nothing pending: no update, snapshot unchanged.
        assert!(!engine.process_live_data());
    }

    #[test]
    fn test_malformed_tick_never_enters_window() {
        let mut engine = ScopeEngine::offline();
        engine.tick_tx.send(tick(1, 100.01)).unwrap();
        engine.tick_tx.send(tick(2, f64::NAN)).unwrap();
        engine.process_live_data();

        assert_eq!(engine.window_len(), 1);
        assert!(engine.last_error().is_some());
    }

    #[test]
    fn test_config_change_applies_next_recompute_without_reset() {
        let mut engine = ScopeEngine::offline();
        let quotes: Vec<Tick> = (0..60).map(|i| tick(i, 100.0 + i as f64 / 100.0)).collect();
        engine.seed_history(quotes);

        // Default range 100: the whole 60 ticks are analyzed.
        assert_eq!(engine.snapshot().unwrap().tick_count, 60);

        engine.update_config(AnalysisConfig {
            mode: AnalysisMode::RiseFall,
            range: WindowRange::R25,
        });
        // Old snapshot still up until the next tick arrives.
        assert_eq!(engine.snapshot().unwrap().tick_count, 60);

        engine.tick_tx.send(tick(100, 100.99)).unwrap();
        engine.process_live_data();

        let snap = engine.snapshot().unwrap();
        assert_eq!(snap.range, WindowRange::R25);
        assert_eq!(snap.tick_count, 25);
        assert!(matches!(snap.report, ModeReport::RiseFall(_)));
        // The window itself kept everything.
        assert_eq!(engine.window_len(), 61);
    }

    #[test]
    fn test_all_mode_reports_cover_every_mode() {
        let mut engine = ScopeEngine::offline();
        engine.seed_history(vec![tick(1, 100.02), tick(2, 100.03), tick(3, 100.03)]);

        let reports = engine.reports_for_all_modes();
        assert_eq!(reports.len(), 4);
        match &reports[0] {
            ModeReport::EvenOdd(r) => {
                assert_eq!(r.summary.streak.category, Some(Parity::Odd));
                assert_eq!(r.summary.streak.length, 2);
            }
            other => panic!("expected EvenOdd first, got {:?}", other),
        }
    }
}
