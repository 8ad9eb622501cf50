use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::render::escape;
use crate::surface::{Region, Surface};

/// Transient message in the top bar.
///
/// Each message clears itself after `duration`. Showing a new message
/// replaces the current one, and an expired older message never clears a
/// newer one.
#[derive(Clone)]
pub struct Banner {
    surface: Arc<dyn Surface>,
    duration: Duration,
    generation: Arc<Mutex<u64>>,
}

impl Banner {
    pub fn new(surface: Arc<dyn Surface>, duration: Duration) -> Self {
        Self {
            surface,
            duration,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// Show plain `text`. Must be called inside a tokio runtime.
    pub fn show(&self, text: &str) {
        let shown = {
            let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
            *generation += 1;
            self.surface.set_html(Region::TopBar, &escape(text));
            *generation
        };

        let surface = self.surface.clone();
        let generation = self.generation.clone();
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let current = generation.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == shown {
                surface.set_html(Region::TopBar, "");
            }
        });
    }
}
