use crossterm::event::{self, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Polls the terminal on a background thread and forwards events in order
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        // Presses only; some terminals also report releases
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        Ok(event::Event::Resize(_, _)) => Event::Resize,
                        Ok(_) => continue,
                        Err(e) => {
                            warn!("Failed to read terminal event: {}", e);
                            continue;
                        }
                    },
                    Ok(false) => Event::Tick,
                    Err(e) => {
                        warn!("Terminal poll failed: {}", e);
                        break;
                    }
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
