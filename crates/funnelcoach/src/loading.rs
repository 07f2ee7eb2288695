use std::time::Duration;

use funnelcoach_core::carousel::Carousel;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

/// Spinner shown while an analysis is in flight, cycling through carousel tips.
///
/// The rotation task is aborted and the spinner cleared on [`LoadingIndicator::stop`]
/// or on drop, whichever comes first, so an early `?` never leaves it running.
pub struct LoadingIndicator {
    spinner: ProgressBar,
    rotation: Option<JoinHandle<()>>,
}

impl LoadingIndicator {
    pub fn start(mut carousel: Carousel, interval: Duration) -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(slide_message(&carousel));

        let rotation = if carousel.len() > 1 && !interval.is_zero() {
            let spinner = spinner.clone();
            Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                // The first tick completes immediately.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    if let Some(change) = carousel.next() {
                        log::debug!("carousel {} -> {}", change.previous, change.current);
                    }
                    spinner.set_message(slide_message(&carousel));
                }
            }))
        } else {
            None
        };

        Self { spinner, rotation }
    }

    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if let Some(rotation) = self.rotation.take() {
            rotation.abort();
        }
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn is_rotating(&self) -> bool {
        self.rotation.is_some()
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.halt();
    }
}

fn slide_message(carousel: &Carousel) -> String {
    match carousel.current() {
        Some(slide) => format!("Analyzing transcript... {}", slide),
        None => "Analyzing transcript...".to_string(),
    }
}
