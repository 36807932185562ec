//! Emitting messages about instant events to whoever is listening

use std::{
    cell::RefCell,
    sync::mpsc::{self, Sender},
};

use derive_more::Deref;
use glam::Vec2;

use crate::{Entity, Mode};

/// Game events for UI, audio and ability layers.
#[derive(Clone, PartialEq, Debug)]
pub enum Msg {
    /// Perception mode was switched.
    ModeChanged(Mode),

    /// Hostile came into view.
    Spotted(Entity),

    /// Boss got pinned down by the player's gaze.
    BossFrozen(Entity),

    /// Boss broke free and reappeared at a new position.
    Teleported(Entity, Vec2),
}

thread_local! {
    static RCV: RefCell<Option<Sender<Msg>>> = const { RefCell::new(None) };
}

/// Subscription to the messages sent on the current thread.
///
/// Creating a new receiver replaces the previous one.
#[derive(Deref)]
pub struct Receiver(mpsc::Receiver<Msg>);

impl Default for Receiver {
    fn default() -> Self {
        let (send, recv) = mpsc::channel();
        RCV.with(|r| *r.borrow_mut() = Some(send));
        Receiver(recv)
    }
}

/// Send a message, does nothing if nobody is listening.
pub fn send_msg(msg: Msg) {
    RCV.with(|r| {
        if let Some(sender) = &*r.borrow() {
            // Receiver may have been dropped, that's fine.
            let _ = sender.send(msg);
        }
    });
}
