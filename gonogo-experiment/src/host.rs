//! A presentation host fed by a key channel. The screen side is a small
//! trait so terminals, windows and tests can plug in.

use async_trait::async_trait;
use gonogo_core::{Capture, HostError, Key, PhaseContent, PhaseSpec, PresentationHost};
use gonogo_timing::{WindowOutcome, response_window};
use tokio::sync::mpsc::UnboundedReceiver;

pub trait Screen {
    fn show(&mut self, content: &PhaseContent) -> Result<(), HostError>;
}

/// Escape aborts from any phase.
pub struct ChannelHost<S: Screen> {
    screen: S,
    keys: UnboundedReceiver<Key>,
}

impl<S: Screen> ChannelHost<S> {
    pub fn new(screen: S, keys: UnboundedReceiver<Key>) -> Self {
        Self { screen, keys }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn into_parts(self) -> (S, UnboundedReceiver<Key>) {
        (self.screen, self.keys)
    }
}

#[async_trait(?Send)]
impl<S: Screen> PresentationHost for ChannelHost<S> {
    async fn present(&mut self, spec: &PhaseSpec) -> Result<Capture, HostError> {
        self.screen.show(&spec.content)?;
        let outcome = response_window(&mut self.keys, spec.duration, |key| {
            *key == Key::Escape || spec.keys.accepts(key)
        })
        .await;
        match outcome {
            WindowOutcome::Accepted {
                key: Key::Escape, ..
            } => Err(HostError::Aborted),
            WindowOutcome::Accepted { key, elapsed } => Ok(Capture::Response { key, elapsed }),
            WindowOutcome::Elapsed(_) => Ok(Capture::Timeout),
            WindowOutcome::Closed => Err(HostError::InputClosed),
        }
    }

    async fn read_text(&mut self, prompt: &str) -> Result<String, HostError> {
        let mut buffer = String::new();
        loop {
            self.screen
                .show(&PhaseContent::Text(format!("{prompt}\n> {buffer}")))?;
            match self.keys.recv().await {
                Some(Key::Enter) => return Ok(buffer),
                Some(Key::Escape) => return Err(HostError::Aborted),
                Some(Key::Backspace) => {
                    buffer.pop();
                }
                Some(Key::Space) => buffer.push(' '),
                Some(Key::Char(c)) => buffer.push(c),
                None => return Err(HostError::InputClosed),
            }
        }
    }
}

/// Screen that keeps everything it was asked to show.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingScreen {
    pub shown: Vec<PhaseContent>,
}

#[cfg(test)]
impl Screen for RecordingScreen {
    fn show(&mut self, content: &PhaseContent) -> Result<(), HostError> {
        self.shown.push(content.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonogo_core::{GO_KEY, KeyFilter, StimulusWord};
    use std::time::Duration;
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::sleep;

    fn stimulus() -> PhaseSpec {
        PhaseSpec::timed(
            PhaseContent::Word(StimulusWord::Blauw),
            Duration::from_millis(1000),
            KeyFilter::Only(vec![GO_KEY]),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn go_key_captured_with_latency() {
        let (tx, rx) = unbounded_channel();
        let mut host = ChannelHost::new(RecordingScreen::default(), rx);
        tokio::spawn(async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(Key::Char('a')).unwrap();
            sleep(Duration::from_millis(320)).await;
            tx.send(GO_KEY).unwrap();
        });
        let capture = host.present(&stimulus()).await.unwrap();
        assert_eq!(
            capture,
            Capture::Response {
                key: GO_KEY,
                elapsed: Duration::from_millis(420)
            }
        );
        assert_eq!(
            host.screen().shown,
            vec![PhaseContent::Word(StimulusWord::Blauw)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn escape_aborts() {
        let (tx, rx) = unbounded_channel();
        let mut host = ChannelHost::new(RecordingScreen::default(), rx);
        tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            tx.send(Key::Escape).unwrap();
        });
        let fixation = PhaseSpec::timed(
            PhaseContent::Fixation,
            Duration::from_millis(500),
            KeyFilter::None,
        );
        assert!(matches!(
            host.present(&fixation).await,
            Err(HostError::Aborted)
        ));
    }

    #[tokio::test]
    async fn text_entry_supports_backspace() {
        let (tx, rx) = unbounded_channel();
        let mut host = ChannelHost::new(RecordingScreen::default(), rx);
        for key in [
            Key::Char('P'),
            Key::Char('x'),
            Key::Backspace,
            Key::Char('1'),
            Key::Enter,
        ] {
            tx.send(key).unwrap();
        }
        assert_eq!(host.read_text("id?").await.unwrap(), "P1");
        assert_eq!(
            host.screen().shown.last(),
            Some(&PhaseContent::Text("id?\n> P1".to_string()))
        );
    }

    #[tokio::test]
    async fn closed_input_ends_text_entry() {
        let (tx, rx) = unbounded_channel::<Key>();
        drop(tx);
        let mut host = ChannelHost::new(RecordingScreen::default(), rx);
        assert!(matches!(
            host.read_text("id?").await,
            Err(HostError::InputClosed)
        ));
    }
}
