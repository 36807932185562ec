//! Headless scripted play session.

use std::{collections::BTreeMap, str::FromStr};

use anyhow::{bail, Context};
use engine::{prelude::*, slot_for_key};

/// How far a torch lights up around the player.
const TORCH_RADIUS: f32 = 64.0;

/// How long a torch burns.
const TORCH_MS: u32 = 3000;

/// One scripted input.
#[derive(Clone, PartialEq, Debug)]
pub enum Command {
    /// Mode slot key, eg. "3" or "Num3".
    Key(String),
    NextMode,
    PreviousMode,
    /// Start walking in a direction, zero stops.
    Walk(Vec2),
    /// Drop a torch at the player's feet.
    Torch,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Command::*;

        Ok(match s {
            "next" => NextMode,
            "prev" => PreviousMode,
            "up" => Walk(vec2(0.0, -1.0)),
            "down" => Walk(vec2(0.0, 1.0)),
            "left" => Walk(vec2(-1.0, 0.0)),
            "right" => Walk(vec2(1.0, 0.0)),
            "stop" => Walk(Vec2::ZERO),
            "torch" => Torch,
            s if slot_for_key(s).is_some() => Key(s.to_string()),
            s => bail!("unknown command {s:?}"),
        })
    }
}

/// Commands keyed by the frame they run on.
///
/// Written as a comma separated list of `frame:command` items, eg.
/// `"0:right,30:2,90:stop"`.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Script(BTreeMap<u32, Vec<Command>>);

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ret = Script::default();
        for item in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((frame, cmd)) = item.split_once(':') else {
                bail!("script item {item:?} is not frame:command");
            };
            let frame: u32 = frame
                .trim()
                .parse()
                .with_context(|| format!("bad frame in {item:?}"))?;
            ret.0.entry(frame).or_default().push(cmd.trim().parse()?);
        }
        Ok(ret)
    }
}

impl Script {
    pub fn at(&self, frame: u32) -> &[Command] {
        self.0.get(&frame).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Event counts from a session.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Summary {
    pub frames: u32,
    pub mode_changes: usize,
    pub spotted: usize,
    pub boss_freezes: usize,
    pub teleports: usize,
}

pub struct Session {
    runtime: Runtime,
    selector: ModeSelector,
    script: Script,
    walk: Vec2,
    rx: Receiver,
    summary: Summary,
}

impl Session {
    pub fn new(runtime: Runtime, script: Script) -> Self {
        Session {
            runtime,
            selector: Default::default(),
            script,
            walk: Vec2::ZERO,
            rx: Default::default(),
            summary: Default::default(),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn apply(&mut self, cmd: &Command) {
        let field = self.runtime.field_mut();
        match cmd {
            Command::Key(key) => {
                self.selector.handle_key(field, key);
            }
            Command::NextMode => {
                self.selector.next(field);
            }
            Command::PreviousMode => {
                self.selector.previous(field);
            }
            Command::Walk(dir) => self.walk = *dir,
            Command::Torch => {
                let pos = self.runtime.player().pos;
                self.runtime.light_torch(pos, TORCH_RADIUS, TORCH_MS);
            }
        }
    }

    /// Run one frame.
    pub fn step(&mut self, dt_ms: u32) {
        let frame = self.summary.frames;
        for cmd in self.script.at(frame).to_vec() {
            log::debug!("frame {frame}: {cmd:?}");
            self.apply(&cmd);
        }

        self.runtime.move_player(self.walk, dt_ms);
        self.runtime.tick(dt_ms);
        self.summary.frames += 1;

        for msg in self.rx.try_iter() {
            match msg {
                Msg::ModeChanged(m) => {
                    self.summary.mode_changes += 1;
                    log::info!("frame {frame}: mode {m}");
                }
                Msg::Spotted(e) => {
                    self.summary.spotted += 1;
                    log::info!("frame {frame}: spotted {e:?}");
                }
                Msg::BossFrozen(_) => {
                    self.summary.boss_freezes += 1;
                    log::info!("frame {frame}: boss frozen");
                }
                Msg::Teleported(_, pos) => {
                    self.summary.teleports += 1;
                    log::info!("frame {frame}: boss teleported to {pos}");
                }
            }
        }
    }

    pub fn run(&mut self, frames: u32, dt_ms: u32) -> Summary {
        for _ in 0..frames {
            self.step(dt_ms);
        }
        self.summary
    }
}
