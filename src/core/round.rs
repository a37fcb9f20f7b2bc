//! Round controller - the per-frame placement state machine
//!
//! Owns every packet of a round plus the score state. One `advance(dt)` call
//! per rendered frame moves the active packet, resolves landings against the
//! floor and the landed packets, and spawns the next packet. Input commands
//! go through [`GameRound::apply_action`] before the frame's fall step, so a
//! user action and gravity never interleave within one frame.

use crate::core::generator::PacketGenerator;
use crate::core::packet::Packet;
use crate::core::shape::GeometryError;
use crate::types::{
    FieldGeometry, GameMode, PacketAction, BLOCK_SIDE, INITIAL_WAIT_SECS, POINTS_PER_CONTACT,
    POPUP_LIFETIME_SECS, POPUP_RISE_PX,
};

/// A transient score popup: spawned at the landing position, drifts upward
/// and fades over its fixed lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePopup {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub remaining: f32,
}

impl ScorePopup {
    fn new(points: u32, x: i32, y: i32) -> Self {
        Self {
            text: points.to_string(),
            x,
            y,
            remaining: POPUP_LIFETIME_SECS,
        }
    }

    /// Current y including the upward drift, for rendering.
    pub fn display_y(&self) -> i32 {
        let progress = 1.0 - self.remaining / POPUP_LIFETIME_SECS;
        self.y + (progress * POPUP_RISE_PX) as i32
    }

    /// Remaining life as a fraction in [0, 1], for fading.
    pub fn opacity(&self) -> f32 {
        (self.remaining / POPUP_LIFETIME_SECS).clamp(0.0, 1.0)
    }
}

/// Where the round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Initial delay; the active packet holds still and ignores input.
    Waiting,
    /// The active packet is falling and controllable.
    Falling,
    /// Terminal. No packet moves and no packet spawns.
    GameOver,
}

/// Final report of a finished round, for the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub mode: GameMode,
    pub score: u32,
    pub new_best: bool,
}

/// One game round: landed packets, the active packet, score and popups.
#[derive(Debug, Clone)]
pub struct GameRound {
    mode: GameMode,
    field: FieldGeometry,
    generator: PacketGenerator,
    landed: Vec<Packet>,
    active: Option<Packet>,
    score: u32,
    best: u32,
    new_best: bool,
    spawning: bool,
    initial_wait: f32,
    popups: Vec<ScorePopup>,
}

impl GameRound {
    /// Start a round on the default field. `best` is the stored high score
    /// for this mode, used only for the final new-best decision.
    pub fn new(mode: GameMode, seed: u32, best: u32) -> Result<Self, GeometryError> {
        Self::with_field(mode, seed, best, FieldGeometry::default())
    }

    pub fn with_field(
        mode: GameMode,
        seed: u32,
        best: u32,
        field: FieldGeometry,
    ) -> Result<Self, GeometryError> {
        let mut generator = PacketGenerator::new(seed, mode.block_only());
        let active = generator.spawn(&field)?;
        Ok(Self {
            mode,
            field,
            generator,
            landed: Vec::new(),
            active: Some(active),
            score: 0,
            best,
            new_best: false,
            spawning: true,
            initial_wait: INITIAL_WAIT_SECS,
            popups: Vec::new(),
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn field(&self) -> &FieldGeometry {
        &self.field
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// High score for this mode as known to the round, including the current
    /// round once it beats the stored value.
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn phase(&self) -> RoundPhase {
        if !self.spawning {
            RoundPhase::GameOver
        } else if self.initial_wait > 0.0 {
            RoundPhase::Waiting
        } else {
            RoundPhase::Falling
        }
    }

    pub fn is_over(&self) -> bool {
        !self.spawning
    }

    /// Landed packets, in landing order. The game-over packet is last and
    /// carries the `marked` flag.
    pub fn landed(&self) -> &[Packet] {
        &self.landed
    }

    /// The currently falling packet, if the round is still running.
    pub fn active(&self) -> Option<&Packet> {
        self.active.as_ref()
    }

    pub fn popups(&self) -> &[ScorePopup] {
        &self.popups
    }

    /// Final result, available once the round is over.
    pub fn result(&self) -> Option<RoundResult> {
        if self.spawning {
            return None;
        }
        Some(RoundResult {
            mode: self.mode,
            score: self.score,
            new_best: self.new_best,
        })
    }

    /// Apply one user command to the active packet. Returns whether the move
    /// was committed; rejected moves leave everything unchanged. Commands are
    /// ignored while waiting or after game over.
    pub fn apply_action(&mut self, action: PacketAction) -> bool {
        if self.phase() != RoundPhase::Falling {
            return false;
        }
        let Some(packet) = self.active.as_mut() else {
            return false;
        };
        match action {
            PacketAction::ShiftLeft => packet.try_shift(-1, &self.landed, &self.field),
            PacketAction::ShiftRight => packet.try_shift(1, &self.landed, &self.field),
            PacketAction::RotateCcw => packet.try_rotate(false, &self.landed, &self.field),
            PacketAction::RotateCw => packet.try_rotate(true, &self.landed, &self.field),
        }
    }

    /// Advance the round by `dt` seconds of game time.
    ///
    /// Errors only bubble up from packet generation, which fails solely on
    /// invalid field geometry.
    pub fn advance(&mut self, dt: f32) -> Result<(), GeometryError> {
        self.popups.retain_mut(|p| {
            p.remaining -= dt;
            p.remaining > 0.0
        });

        if !self.spawning {
            return Ok(());
        }

        // The countdown is checked after decrementing, so the frame in which
        // it crosses zero already moves the packet.
        if self.initial_wait > 0.0 {
            self.initial_wait -= dt;
        }
        let d = if self.initial_wait > 0.0 {
            0
        } else {
            (self.mode.fall_speed() * dt).round() as i32
        };

        let Some(mut packet) = self.active.take() else {
            return Ok(());
        };
        packet.set_y(packet.y() - d);

        let floor = self.field.floor_y();
        if packet.y() <= floor {
            // Floor landing. Contact bonus counts the packet's own bottom row
            // plus any flush contact with neighboring packets.
            packet.set_y(floor);
            let contacts =
                packet.shape().bottom_row_count() as u32 + self.overlap_count_all(&packet);
            let points = packet.land() + contacts * POINTS_PER_CONTACT;
            self.settle(packet, points)?;
            return Ok(());
        }

        let contacts = self.overlap_count_all(&packet);
        if contacts == 0 {
            self.active = Some(packet);
            return Ok(());
        }

        // Snap to the block-grid line at or below the pre-move position, so
        // the packet rests flush on whatever it hit.
        let rel = packet.y() - floor + d;
        let snapped = rel - rel % BLOCK_SIDE + floor;
        packet.set_y(snapped);

        if snapped + packet.height_px() > self.field.ceiling_y() {
            packet.mark();
            packet.freeze();
            self.landed.push(packet);
            self.spawning = false;
            if self.score > self.best {
                self.best = self.score;
                self.new_best = true;
            }
            return Ok(());
        }

        let points = packet.land() + contacts * POINTS_PER_CONTACT;
        self.settle(packet, points)?;
        Ok(())
    }

    /// Padded downward contact of `packet` against every landed packet.
    fn overlap_count_all(&self, packet: &Packet) -> u32 {
        self.landed
            .iter()
            .map(|other| packet.overlap_count(other, true))
            .sum()
    }

    /// Commit a landed packet: score it, emit its popup, spawn the next one.
    fn settle(&mut self, packet: Packet, points: u32) -> Result<(), GeometryError> {
        self.score += points;
        self.popups.push(ScorePopup::new(
            points,
            packet.x_px() + packet.width_px() / 4,
            packet.y() + packet.height_px() * 3 / 4,
        ));
        self.landed.push(packet);
        self.active = Some(self.generator.spawn(&self.field)?);
        Ok(())
    }
}
