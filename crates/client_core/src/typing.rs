//! Role-cycle typing animation.
//!
//! [`TypingEffect`] is the pure state machine: every [`tick`](TypingEffect::tick)
//! types or deletes one character of the current role and reports how long to
//! wait before the next tick. [`TypingTicker`] drives an effect on the tokio
//! timer and owns the task, so dropping it stops the animation.

use std::time::Duration;

use shared::catalog::ROLES;
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

use crate::error::TypingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_delay: Duration,
    pub pause: Duration,
    pub delete_delay: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(80),
            pause: Duration::from_millis(2000),
            delete_delay: Duration::from_millis(40),
        }
    }
}

/// Snapshot of the animation. `delay` is the wait before the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub role_index: usize,
    pub text: String,
    pub deleting: bool,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TypingEffect {
    roles: Vec<String>,
    timings: TypingTimings,
    role_index: usize,
    // Length of `text` in chars; `text` is always the first `typed` chars of
    // the current role.
    typed: usize,
    text: String,
    deleting: bool,
    delay: Duration,
}

impl TypingEffect {
    pub fn new<I, S>(roles: I) -> Result<Self, TypingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_timings(roles, TypingTimings::default())
    }

    pub fn with_timings<I, S>(roles: I, timings: TypingTimings) -> Result<Self, TypingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(TypingError::NoRoles);
        }
        Ok(Self::from_checked(roles, timings))
    }

    fn from_checked(roles: Vec<String>, timings: TypingTimings) -> Self {
        Self {
            roles,
            timings,
            role_index: 0,
            typed: 0,
            text: String::new(),
            deleting: false,
            delay: timings.type_delay,
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn timings(&self) -> TypingTimings {
        self.timings
    }

    pub fn current_role(&self) -> &str {
        &self.roles[self.role_index]
    }

    pub fn current(&self) -> Frame {
        Frame {
            role_index: self.role_index,
            text: self.text.clone(),
            deleting: self.deleting,
            delay: self.delay,
        }
    }

    pub fn restart(&mut self) {
        self.role_index = 0;
        self.typed = 0;
        self.text.clear();
        self.deleting = false;
        self.delay = self.timings.type_delay;
    }

    pub fn tick(&mut self) -> Frame {
        if self.deleting {
            self.delete_step();
        } else {
            self.type_step();
        }
        self.current()
    }

    fn type_step(&mut self) {
        let role = &self.roles[self.role_index];
        if let Some(next) = role.chars().nth(self.typed) {
            self.text.push(next);
            self.typed += 1;
        }
        if self.typed == role.chars().count() {
            self.deleting = true;
            self.delay = self.timings.pause;
        } else {
            self.delay = self.timings.type_delay;
        }
    }

    fn delete_step(&mut self) {
        if self.text.pop().is_some() {
            self.typed -= 1;
        }
        self.delay = self.timings.delete_delay;
        if self.typed == 0 {
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
        }
    }
}

/// Cycles the site's hero roles with the standard timings.
impl Default for TypingEffect {
    fn default() -> Self {
        Self::from_checked(
            ROLES.iter().map(|role| role.to_string()).collect(),
            TypingTimings::default(),
        )
    }
}

impl Iterator for TypingEffect {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        Some(self.tick())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Runs a [`TypingEffect`] on the tokio timer and publishes each frame.
///
/// The ticking task belongs to the ticker: [`stop`](Self::stop) or dropping
/// the ticker aborts it.
pub struct TypingTicker {
    frames: watch::Receiver<Frame>,
    task: JoinHandle<()>,
}

impl TypingTicker {
    pub fn spawn(mut effect: TypingEffect) -> Self {
        let (tx, rx) = watch::channel(effect.current());
        let task = tokio::spawn(async move {
            let mut delay = effect.current().delay;
            loop {
                tokio::time::sleep(delay).await;
                let frame = effect.tick();
                delay = frame.delay;
                if tx.send(frame).is_err() {
                    debug!("typing ticker has no subscribers left; stopping");
                    break;
                }
            }
        });
        Self { frames: rx, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    pub fn latest(&self) -> Frame {
        self.frames.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for TypingTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/typing_tests.rs"]
mod tests;
