//! The run engine.
//!
//! `Engine` owns the whole run and is the only thing that mutates it. Every
//! command validates fully, then mutates, and reports what happened as an
//! `Outcome`; a `Rejection` always means nothing changed.
//!
//! ## Turn pipeline
//!
//! Player move: place, tick locks, score, after-player passives (Thorns),
//! commit snapshot, refill energy, check the fight, then queue the enemy
//! turn.
//!
//! Enemy turn (fired by the scheduler): choose, place, tick locks, score,
//! after-enemy passives (Lockdown, Corrupt), commit snapshot, check the
//! fight, then end-of-turn passives: on a Double Tap roll repeat
//! choose/place/tick/score/commit/check once more.
//!
//! Cards resolve in place: they never tick locks or pass the turn.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::ai::{choose_move, FullLineProbe, ScoreProbe};
use crate::board::{playable_cells, Board, Cell, LockMap};
use crate::cards::{CardKind, CardResolver, Energy, Hand, PendingCard};
use crate::core::{ConfigError, GameConfig, GameRng, Phase, Rejection, Side};
use crate::encounters::{
    apply_corrupt, apply_lockdown, apply_thorns, roll_double_tap, roll_encounter, Encounter,
    EncounterId, Passive, PassiveEvent, PassiveParams, PassiveTiming,
};
use crate::progression::{apply_reward, make_offer, Mode, RewardApplied, RewardOption};
use crate::scoring::ScoreLedger;

use super::phase::FightEnd;
use super::scheduler::{ActionKind, ScheduledAction, Scheduler};
use super::snapshot::{LastMove, Snapshot};

/// Everything that happened during one side's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub side: Side,
    /// Marks placed by real moves, in order. Empty for a skipped turn.
    pub moves: SmallVec<[LastMove; 2]>,
    /// Passives that fired.
    pub passives: Vec<PassiveEvent>,
    /// Set when the turn decided the fight.
    pub fight_end: Option<FightEnd>,
    /// Enemy turn queued by this player turn.
    pub scheduled: Option<ScheduledAction>,
}

impl TurnReport {
    fn new(side: Side) -> Self {
        Self {
            side,
            moves: SmallVec::new(),
            passives: Vec::new(),
            fight_end: None,
            scheduled: None,
        }
    }
}

/// Result of an accepted command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    RunStarted { floor: u32, encounter: EncounterId },
    Played(TurnReport),
    Passed(TurnReport),
    EnemyPlayed(TurnReport),
    CardArmed(CardKind),
    CardDisarmed,
    TargetAdded { kind: CardKind, remaining: usize },
    CardResolved {
        kind: CardKind,
        board_changed: bool,
        fight_end: Option<FightEnd>,
    },
    /// Resolution failed; the selection is cleared at no cost.
    CardFizzled { kind: CardKind, reason: Rejection },
    RewardTaken { applied: RewardApplied, floor: u32 },
    Rematch { floor: u32 },
    /// The clock moved but nothing was due.
    Waiting,
    /// A stale scheduled action was dropped.
    Discarded,
}

/// State scoped to one fight; rebuilt on every reset.
#[derive(Clone, Debug)]
struct FightState {
    board: Board,
    history: Vector<Board>,
    locks: LockMap,
    ledger: ScoreLedger,
    encounter: Encounter,
    params: PassiveParams,
    turn: Side,
    pending: Option<PendingCard>,
    last_move: Option<LastMove>,
}

impl FightState {
    fn new(mode: Mode, floor: u32, encounter: Encounter) -> Self {
        let board = mode.board_for(floor);
        Self {
            history: Vector::unit(board.clone()),
            locks: LockMap::new(board.cell_count()),
            ledger: ScoreLedger::new(),
            params: encounter.params(floor),
            encounter,
            board,
            turn: Side::PLAYER,
            pending: None,
            last_move: None,
        }
    }
}

/// State that persists across the fights of a run.
#[derive(Clone, Debug)]
struct RunState {
    floor: u32,
    hand: Hand,
    energy: Energy,
    phase: Phase,
    reward_offer: Vec<RewardOption>,
    fight: FightState,
}

impl RunState {
    fn fresh(config: &GameConfig, encounter: Encounter) -> Self {
        Self {
            floor: 1,
            hand: Hand::starting(),
            energy: Energy::full(config.starting_energy),
            phase: Phase::Playing,
            reward_offer: Vec::new(),
            fight: FightState::new(config.mode, 1, encounter),
        }
    }
}

/// Log a rejection at debug level and pass it through.
fn rejected(command: &'static str, reason: Rejection) -> Rejection {
    debug!(target: "roguetac::engine", command, %reason, "command.rejected");
    reason
}

/// Single-player roguelike engine.
#[derive(Clone, Debug)]
pub struct Engine {
    config: GameConfig,
    run: RunState,
    scheduler: Scheduler,
    ai_rng: GameRng,
    passive_rng: GameRng,
    reward_rng: GameRng,
    encounter_rng: GameRng,
}

impl Engine {
    /// Validate `config` and start a run on floor 1.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let root = GameRng::new(config.seed);
        let mut encounter_rng = root.for_context("encounters");
        let encounter = draw_encounter(&config, 1, &mut encounter_rng);
        let run = RunState::fresh(&config, encounter);

        info!(
            target: "roguetac::engine",
            mode = ?config.mode,
            seed = config.seed,
            encounter = run.fight.encounter.name,
            "run.started"
        );

        Ok(Self {
            scheduler: Scheduler::new(config.enemy_delay_ms),
            ai_rng: root.for_context("ai"),
            passive_rng: root.for_context("passives"),
            reward_rng: root.for_context("rewards"),
            encounter_rng,
            run,
            config,
        })
    }

    // === Observation ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.run.phase
    }

    #[must_use]
    pub fn floor(&self) -> u32 {
        self.run.floor
    }

    /// Side whose turn it is.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.run.fight.turn
    }

    /// Current board (always the last history entry).
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.run.fight.board
    }

    /// Committed board snapshots of this fight, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<Board> {
        &self.run.fight.history
    }

    #[must_use]
    pub fn locks(&self) -> &LockMap {
        &self.run.fight.locks
    }

    #[must_use]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.run.fight.ledger
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.run.hand
    }

    #[must_use]
    pub fn energy(&self) -> Energy {
        self.run.energy
    }

    #[must_use]
    pub fn encounter(&self) -> &Encounter {
        &self.run.fight.encounter
    }

    /// Trigger parameters of the active encounter on this floor.
    #[must_use]
    pub fn passive_params(&self) -> PassiveParams {
        self.run.fight.params
    }

    #[must_use]
    pub fn pending_card(&self) -> Option<&PendingCard> {
        self.run.fight.pending.as_ref()
    }

    #[must_use]
    pub fn reward_offer(&self) -> &[RewardOption] {
        &self.run.reward_offer
    }

    #[must_use]
    pub fn last_move(&self) -> Option<LastMove> {
        self.run.fight.last_move
    }

    /// The queued enemy turn, if any.
    #[must_use]
    pub fn scheduled(&self) -> Option<ScheduledAction> {
        self.scheduler.queued()
    }

    /// Check if the enemy turn is queued.
    #[must_use]
    pub fn is_enemy_thinking(&self) -> bool {
        self.scheduler.is_waiting()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Current fight generation; bumped on every reset.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    /// Observable copy of the run.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let fight = &self.run.fight;
        Snapshot {
            mode: self.config.mode,
            phase: self.run.phase,
            floor: self.run.floor,
            turn: fight.turn,
            board: fight.board.clone(),
            scores: fight.ledger.scores().clone(),
            energy: self.run.energy,
            hand: self.run.hand.clone(),
            locks: fight.locks.active(),
            encounter: (&fight.encounter).into(),
            pending_card: fight.pending.clone(),
            reward_offer: self.run.reward_offer.clone(),
            enemy_thinking: self.scheduler.is_waiting(),
            history_len: fight.history.len(),
            last_move: fight.last_move,
        }
    }

    // === Run lifecycle ===

    /// Begin a fresh run on floor 1. Allowed in any phase.
    pub fn start_run(&mut self) -> Result<Outcome, Rejection> {
        let encounter = draw_encounter(&self.config, 1, &mut self.encounter_rng);
        let id = encounter.id;
        self.run = RunState::fresh(&self.config, encounter);
        self.scheduler.bump();

        info!(target: "roguetac::engine", encounter = ?id, "run.started");
        Ok(Outcome::RunStarted { floor: 1, encounter: id })
    }

    /// Start over after a loss.
    pub fn restart_run(&mut self) -> Result<Outcome, Rejection> {
        if self.run.phase != Phase::GameOver {
            return Err(rejected("restart_run", Rejection::WrongPhase(self.run.phase)));
        }
        self.start_run()
    }

    /// Replay the same floor after a score-mode tie.
    pub fn rematch(&mut self) -> Result<Outcome, Rejection> {
        if self.run.phase != Phase::Draw {
            return Err(rejected("rematch", Rejection::WrongPhase(self.run.phase)));
        }
        let encounter = self.run.fight.encounter.clone();
        self.reset_fight(encounter);
        self.run.phase = Phase::Playing;

        info!(target: "roguetac::engine", floor = self.run.floor, "fight.rematch");
        Ok(Outcome::Rematch { floor: self.run.floor })
    }

    /// Take reward `option_index` from the offer and advance a floor.
    pub fn choose_reward(&mut self, option_index: usize) -> Result<Outcome, Rejection> {
        if self.run.phase != Phase::Reward {
            return Err(rejected("choose_reward", Rejection::WrongPhase(self.run.phase)));
        }
        let option = *self
            .run
            .reward_offer
            .get(option_index)
            .ok_or_else(|| rejected("choose_reward", Rejection::InvalidRewardOption(option_index)))?;

        let applied = apply_reward(
            option,
            &mut self.run.hand,
            &mut self.run.energy,
            &mut self.reward_rng,
        );
        self.run.reward_offer.clear();
        self.run.floor += 1;
        let encounter = draw_encounter(&self.config, self.run.floor, &mut self.encounter_rng);
        self.reset_fight(encounter);
        self.run.phase = Phase::Playing;

        info!(
            target: "roguetac::engine",
            ?option,
            ?applied,
            floor = self.run.floor,
            "reward.taken"
        );
        Ok(Outcome::RewardTaken {
            applied,
            floor: self.run.floor,
        })
    }

    // === Player commands ===

    /// Place the player's mark at `index`.
    pub fn play_move(&mut self, index: usize) -> Result<Outcome, Rejection> {
        self.ensure_player_turn()
            .and_then(|()| self.ensure_playable(index))
            .map_err(|r| rejected("play_move", r))?;

        let player = Side::PLAYER;
        let mut report = TurnReport::new(player);
        self.run.fight.pending = None;
        report.moves.push(self.place_mark(player, index));

        for passive in self.passives_at(PassiveTiming::AfterPlayerMove) {
            report.passives.extend(self.apply_board_passive(passive));
        }

        self.commit_board();
        self.run.energy.refill();

        report.fight_end = self.check_fight_end(player);
        if report.fight_end.is_none() {
            report.scheduled = Some(self.hand_turn_to_enemy());
        }
        Ok(Outcome::Played(report))
    }

    /// Give up the turn when no empty cell is unlocked.
    pub fn pass_turn(&mut self) -> Result<Outcome, Rejection> {
        self.ensure_player_turn()
            .and_then(|()| {
                let fight = &self.run.fight;
                if playable_cells(&fight.board, &fight.locks).is_empty() {
                    Ok(())
                } else {
                    Err(Rejection::MovesAvailable)
                }
            })
            .map_err(|r| rejected("pass_turn", r))?;

        self.run.fight.pending = None;
        self.run.fight.locks.tick();
        self.run.energy.refill();

        let mut report = TurnReport::new(Side::PLAYER);
        report.scheduled = Some(self.hand_turn_to_enemy());
        debug!(target: "roguetac::engine", "player.passed");
        Ok(Outcome::Passed(report))
    }

    /// Arm `kind`, or disarm it if it is already armed.
    pub fn arm_card(&mut self, kind: CardKind) -> Result<Outcome, Rejection> {
        self.ensure_player_turn().map_err(|r| rejected("arm_card", r))?;

        if self.run.fight.pending.as_ref().map(|p| p.kind) == Some(kind) {
            self.run.fight.pending = None;
            return Ok(Outcome::CardDisarmed);
        }
        self.ensure_card_playable(kind)
            .map_err(|r| rejected("arm_card", r))?;

        self.run.fight.pending = Some(PendingCard::new(kind));
        debug!(target: "roguetac::cards", card = %kind, "card.armed");
        Ok(Outcome::CardArmed(kind))
    }

    /// Drop the armed card.
    pub fn clear_card_selection(&mut self) -> Result<Outcome, Rejection> {
        match self.run.fight.pending.take() {
            Some(_) => Ok(Outcome::CardDisarmed),
            None => Err(rejected("clear_card_selection", Rejection::NoPendingCard)),
        }
    }

    /// Feed `index` to the armed card; resolves once enough targets are in.
    pub fn target_cell(&mut self, index: usize) -> Result<Outcome, Rejection> {
        self.ensure_player_turn()
            .map_err(|r| rejected("target_cell", r))?;
        let mut pending = self
            .run
            .fight
            .pending
            .clone()
            .ok_or_else(|| rejected("target_cell", Rejection::NoPendingCard))?;
        self.ensure_in_range(index)
            .and_then(|()| self.ensure_card_playable(pending.kind))
            .map_err(|r| rejected("target_cell", r))?;

        pending.push_target(index);
        if !pending.is_ready() {
            let (kind, remaining) = (pending.kind, pending.remaining());
            self.run.fight.pending = Some(pending);
            return Ok(Outcome::TargetAdded { kind, remaining });
        }

        self.run.fight.pending = None;
        Ok(self.resolve_card(&pending))
    }

    // === Clock ===

    /// Move the clock forward, firing the enemy turn if it is due.
    pub fn advance_clock(&mut self, elapsed_ms: u64) -> Result<Outcome, Rejection> {
        match self.scheduler.advance(elapsed_ms) {
            Some(action) => Ok(self.dispatch(action)),
            None => Ok(Outcome::Waiting),
        }
    }

    /// Fire `action` now, regardless of its due time.
    ///
    /// Actions from an earlier generation are discarded untouched.
    pub fn fire(&mut self, action: ScheduledAction) -> Result<Outcome, Rejection> {
        if !self.scheduler.claim(action) {
            debug!(
                target: "roguetac::scheduler",
                issued = action.generation,
                current = self.scheduler.generation(),
                "action.stale"
            );
            return Ok(Outcome::Discarded);
        }
        Ok(self.dispatch(action))
    }

    // === Validation ===

    fn ensure_player_turn(&self) -> Result<(), Rejection> {
        if self.run.phase != Phase::Playing {
            return Err(Rejection::WrongPhase(self.run.phase));
        }
        if self.scheduler.is_waiting() {
            return Err(Rejection::EnemyThinking);
        }
        if self.run.fight.turn != Side::PLAYER {
            return Err(Rejection::NotYourTurn);
        }
        Ok(())
    }

    fn ensure_in_range(&self, index: usize) -> Result<(), Rejection> {
        let board = &self.run.fight.board;
        if board.contains(index) {
            Ok(())
        } else {
            Err(Rejection::OutOfRange {
                index,
                cells: board.cell_count(),
            })
        }
    }

    fn ensure_playable(&self, index: usize) -> Result<(), Rejection> {
        self.ensure_in_range(index)?;
        if self.run.fight.locks.is_locked(index) {
            return Err(Rejection::CellLocked(index));
        }
        match self.run.fight.board.get(index) {
            Some(Cell::Empty) => Ok(()),
            _ => Err(Rejection::CellOccupied(index)),
        }
    }

    fn ensure_card_playable(&self, kind: CardKind) -> Result<(), Rejection> {
        let slot = self.run.hand.get(kind).ok_or(Rejection::CardNotOwned)?;
        let energy = self.run.energy;
        if !energy.can_afford(kind.cost()) {
            return Err(Rejection::InsufficientEnergy {
                needed: kind.cost(),
                available: energy.current(),
            });
        }
        if !slot.has_charge() {
            return Err(Rejection::NoCharges);
        }
        Ok(())
    }

    // === Pipeline ===

    fn dispatch(&mut self, action: ScheduledAction) -> Outcome {
        match action.kind {
            ActionKind::EnemyTurn => Outcome::EnemyPlayed(self.run_enemy_turn()),
        }
    }

    fn hand_turn_to_enemy(&mut self) -> ScheduledAction {
        self.run.fight.turn = Side::ENEMY;
        self.scheduler.schedule(ActionKind::EnemyTurn)
    }

    /// Place a mark as a committed move: set, tick locks, score.
    fn place_mark(&mut self, side: Side, index: usize) -> LastMove {
        let fight = &mut self.run.fight;
        fight.board.set(index, Cell::Mark(side));
        fight.locks.tick();

        let score_delta = match self.config.mode {
            Mode::Score => Some(fight.ledger.score_placement(&fight.board, index, side).total),
            Mode::Classic => None,
        };
        let placed = LastMove {
            side,
            index,
            score_delta,
        };
        fight.last_move = Some(placed);

        debug!(target: "roguetac::engine", %side, index, ?score_delta, "mark.placed");
        placed
    }

    fn commit_board(&mut self) {
        let fight = &mut self.run.fight;
        fight.history.push_back(fight.board.clone());
    }

    fn pick_enemy_cell(&mut self) -> Option<usize> {
        let fight = &self.run.fight;
        match self.config.mode {
            Mode::Classic => choose_move(
                &fight.board,
                &fight.locks,
                Side::ENEMY,
                &FullLineProbe,
                &mut self.ai_rng,
            ),
            Mode::Score => {
                let probe = ScoreProbe {
                    ledger: &fight.ledger,
                    threshold: self.config.score_threshold,
                };
                choose_move(&fight.board, &fight.locks, Side::ENEMY, &probe, &mut self.ai_rng)
            }
        }
    }

    fn run_enemy_turn(&mut self) -> TurnReport {
        let enemy = Side::ENEMY;
        let mut report = TurnReport::new(enemy);

        let Some(index) = self.pick_enemy_cell() else {
            self.run.fight.locks.tick();
            self.run.fight.turn = Side::PLAYER;
            debug!(target: "roguetac::engine", "enemy.skipped");
            return report;
        };
        report.moves.push(self.place_mark(enemy, index));

        for passive in self.passives_at(PassiveTiming::AfterEnemyMove) {
            report.passives.extend(self.apply_board_passive(passive));
        }
        self.commit_board();

        report.fight_end = self.check_fight_end(enemy);
        if report.fight_end.is_some() {
            return report;
        }

        for passive in self.passives_at(PassiveTiming::EndOfEnemyTurn) {
            if passive == Passive::DoubleTap && self.double_tap(&mut report) {
                return report;
            }
        }

        self.run.fight.turn = Side::PLAYER;
        report
    }

    /// Passives of the active encounter that fire at `timing`, in catalog order.
    fn passives_at(&self, timing: PassiveTiming) -> SmallVec<[Passive; 2]> {
        let encounter = &self.run.fight.encounter;
        Passive::ALL
            .into_iter()
            .filter(|&p| p.timing() == timing && encounter.has(p))
            .collect()
    }

    /// Run a passive that edits the board or locks in place.
    fn apply_board_passive(&mut self, passive: Passive) -> Option<PassiveEvent> {
        let fight = &mut self.run.fight;
        let params = fight.params;
        match passive {
            Passive::Thorns => {
                let event = apply_thorns(
                    &mut fight.board,
                    &fight.locks,
                    Side::ENEMY,
                    params.thorns_chance,
                    &mut self.passive_rng,
                )?;
                if let (Mode::Score, PassiveEvent::Thorns { index }) = (self.config.mode, &event) {
                    fight.ledger.score_placement(&fight.board, *index, Side::ENEMY);
                }
                Some(event)
            }
            Passive::Lockdown => apply_lockdown(
                &fight.board,
                &mut fight.locks,
                params.lock_count,
                params.lock_duration,
                &mut self.passive_rng,
            ),
            Passive::Corrupt => apply_corrupt(
                &mut fight.board,
                &fight.locks,
                Side::PLAYER,
                params.corrupt_chance,
                &mut self.passive_rng,
            ),
            // Moves rather than edits; see `double_tap`.
            Passive::DoubleTap => None,
        }
    }

    /// Roll Double Tap and play the extra enemy move.
    ///
    /// Returns `true` if the extra move decided the fight.
    fn double_tap(&mut self, report: &mut TurnReport) -> bool {
        let chance = self.run.fight.params.double_tap_chance;
        if !roll_double_tap(chance, &mut self.passive_rng) {
            return false;
        }
        let Some(extra) = self.pick_enemy_cell() else {
            return false;
        };
        report.passives.push(PassiveEvent::DoubleTap);
        report.moves.push(self.place_mark(Side::ENEMY, extra));
        self.commit_board();

        report.fight_end = self.check_fight_end(Side::ENEMY);
        report.fight_end.is_some()
    }

    fn resolve_card(&mut self, pending: &PendingCard) -> Outcome {
        let kind = pending.kind;
        let fight = &mut self.run.fight;

        let effect = match CardResolver::resolve(kind, &pending.targets, &mut fight.board, &mut fight.locks) {
            Ok(effect) => effect,
            Err(reason) => {
                debug!(target: "roguetac::cards", card = %kind, %reason, "card.fizzled");
                return Outcome::CardFizzled { kind, reason };
            }
        };

        self.run.energy.spend(kind.cost());
        self.run.hand.spend_charge(kind);
        debug!(
            target: "roguetac::cards",
            card = %kind,
            targets = ?pending.targets,
            board_changed = effect.board_changed,
            "card.resolved"
        );

        let mut fight_end = None;
        if effect.board_changed {
            self.commit_board();
            fight_end = self.check_fight_end(Side::PLAYER);
        }
        Outcome::CardResolved {
            kind,
            board_changed: effect.board_changed,
            fight_end,
        }
    }

    /// Decide the fight with `acting` checked first; apply the result.
    fn check_fight_end(&mut self, acting: Side) -> Option<FightEnd> {
        let fight = &self.run.fight;
        let result = self.config.mode.fight_result(
            acting,
            &fight.board,
            &fight.ledger,
            self.config.score_threshold,
        )?;
        let end = FightEnd::from_result(result, self.config.mode);

        self.scheduler.bump();
        self.run.fight.pending = None;
        match end {
            FightEnd::Won => {
                self.run.reward_offer = make_offer(&self.run.hand, &mut self.reward_rng);
            }
            FightEnd::Restarted => {
                let encounter = self.run.fight.encounter.clone();
                self.reset_fight(encounter);
            }
            FightEnd::Lost | FightEnd::Drawn => {}
        }
        self.run.phase = end.next_phase();

        info!(
            target: "roguetac::engine",
            floor = self.run.floor,
            ?result,
            phase = ?self.run.phase,
            "fight.ended"
        );
        Some(end)
    }

    /// Rebuild the fight on the current floor; refill hand and energy.
    fn reset_fight(&mut self, encounter: Encounter) {
        self.run.fight = FightState::new(self.config.mode, self.run.floor, encounter);
        self.run.hand.refill();
        self.run.energy.refill();
        let generation = self.scheduler.bump();

        info!(
            target: "roguetac::engine",
            floor = self.run.floor,
            size = self.run.fight.board.size(),
            encounter = self.run.fight.encounter.name,
            boss = self.run.fight.encounter.is_boss,
            generation,
            "fight.started"
        );
    }
}

/// The encounter for `floor`: the pinned one, or a fresh roll.
fn draw_encounter(config: &GameConfig, floor: u32, rng: &mut GameRng) -> Encounter {
    match config.fixed_encounter {
        Some(id) => id.encounter(),
        None => roll_encounter(config.is_boss_floor(floor), rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: Mode) -> Engine {
        let config = GameConfig::new(mode)
            .with_seed(7)
            .with_fixed_encounter(EncounterId::Jailer);
        Engine::new(config).unwrap()
    }

    fn board_from(rows: &[&str]) -> Board {
        let cells = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|ch| match ch {
                'X' => Cell::Mark(Side::X),
                'O' => Cell::Mark(Side::O),
                _ => Cell::Empty,
            })
            .collect();
        Board::from_cells(cells).unwrap()
    }

    fn set_board(engine: &mut Engine, board: Board) {
        engine.run.fight.history.push_back(board.clone());
        engine.run.fight.board = board;
    }

    #[test]
    fn test_new_engine_state() {
        let engine = engine(Mode::Classic);
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.floor(), 1);
        assert_eq!(engine.board().size(), 3);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.turn(), Side::PLAYER);
        assert_eq!(engine.energy(), Energy::full(1));
        assert_eq!(engine.hand().len(), 3);
        assert_eq!(engine.encounter().id, EncounterId::Jailer);
        assert!(!engine.is_enemy_thinking());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::default().with_boss_interval(0);
        assert_eq!(Engine::new(config).err(), Some(ConfigError::ZeroBossInterval));
    }

    #[test]
    fn test_move_then_scheduled_enemy_turn() {
        let mut engine = engine(Mode::Classic);

        let Outcome::Played(report) = engine.play_move(4).unwrap() else {
            panic!("expected a played move");
        };
        let action = report.scheduled.unwrap();
        assert_eq!(action.due_at_ms, 350);
        assert_eq!(engine.turn(), Side::ENEMY);
        assert!(engine.is_enemy_thinking());
        assert_eq!(engine.history().len(), 2);

        assert_eq!(engine.play_move(0), Err(Rejection::EnemyThinking));
        assert_eq!(engine.advance_clock(349), Ok(Outcome::Waiting));

        let Outcome::EnemyPlayed(enemy) = engine.advance_clock(1).unwrap() else {
            panic!("expected the enemy turn");
        };
        assert_eq!(enemy.moves.len(), 1);
        assert_eq!(engine.turn(), Side::PLAYER);
        assert_eq!(engine.history().len(), 3);
        assert_eq!(engine.board().cells_of(Side::O).count(), 1);
    }

    #[test]
    fn test_jailer_locks_after_enemy_move() {
        let mut engine = engine(Mode::Classic);
        engine.play_move(4).unwrap();
        let action = engine.scheduled().unwrap();
        let Outcome::EnemyPlayed(report) = engine.fire(action).unwrap() else {
            panic!("expected the enemy turn");
        };

        let active = engine.locks().active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].1, 2);
        assert!(matches!(report.passives[0], PassiveEvent::Lockdown { turns: 2, .. }));

        let locked = active[0].0;
        let free = playable_cells(engine.board(), engine.locks())[0];
        engine.play_move(free).unwrap();
        assert_eq!(engine.locks().remaining(locked), 1);
    }

    #[test]
    fn test_stale_action_is_discarded() {
        let mut engine = engine(Mode::Classic);
        engine.play_move(0).unwrap();
        let stale = engine.scheduled().unwrap();

        engine.start_run().unwrap();
        let before = engine.snapshot();
        assert_eq!(engine.fire(stale), Ok(Outcome::Discarded));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.board().empty_cells().count(), 9);
    }

    #[test]
    fn test_rejected_moves_change_nothing() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["X..", "...", "..."]));
        engine.run.fight.locks.lock(1, 2);
        let before = engine.snapshot();

        assert_eq!(engine.play_move(0), Err(Rejection::CellOccupied(0)));
        assert_eq!(engine.play_move(1), Err(Rejection::CellLocked(1)));
        assert_eq!(
            engine.play_move(9),
            Err(Rejection::OutOfRange { index: 9, cells: 9 })
        );
        assert_eq!(engine.pass_turn(), Err(Rejection::MovesAvailable));
        assert_eq!(engine.rematch(), Err(Rejection::WrongPhase(Phase::Playing)));
        assert_eq!(engine.choose_reward(0), Err(Rejection::WrongPhase(Phase::Playing)));
        assert_eq!(engine.restart_run(), Err(Rejection::WrongPhase(Phase::Playing)));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_pass_turn_when_everything_locked() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["XO.", "...", "..."]));
        for i in 2..9 {
            engine.run.fight.locks.lock(i, 3);
        }

        let Outcome::Passed(report) = engine.pass_turn().unwrap() else {
            panic!("expected a pass");
        };
        assert!(report.moves.is_empty());
        assert!(report.scheduled.is_some());
        assert_eq!(engine.locks().remaining(2), 2);
        assert_eq!(engine.turn(), Side::ENEMY);
    }

    #[test]
    fn test_enemy_skips_without_playable_cells() {
        let mut engine = engine(Mode::Classic);
        engine.play_move(0).unwrap();
        for i in playable_cells(engine.board(), engine.locks()) {
            engine.run.fight.locks.lock(i, 2);
        }
        let history = engine.history().len();

        let Outcome::EnemyPlayed(report) = engine.advance_clock(1_000).unwrap() else {
            panic!("expected the enemy turn");
        };
        assert!(report.moves.is_empty());
        assert_eq!(engine.turn(), Side::PLAYER);
        assert_eq!(engine.history().len(), history);
        assert_eq!(engine.locks().remaining(1), 1);
    }

    #[test]
    fn test_player_win_offers_rewards() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["XX.", "OO.", "..."]));

        let Outcome::Played(report) = engine.play_move(2).unwrap() else {
            panic!("expected a played move");
        };
        assert_eq!(report.fight_end, Some(FightEnd::Won));
        assert_eq!(report.scheduled, None);
        assert_eq!(engine.phase(), Phase::Reward);
        assert_eq!(engine.reward_offer().len(), 3);
        assert!(!engine.is_enemy_thinking());

        assert_eq!(engine.play_move(5), Err(Rejection::WrongPhase(Phase::Reward)));
        assert_eq!(engine.choose_reward(3), Err(Rejection::InvalidRewardOption(3)));

        let Outcome::RewardTaken { floor, .. } = engine.choose_reward(0).unwrap() else {
            panic!("expected a reward");
        };
        assert_eq!(floor, 2);
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.board().size(), 4);
        assert_eq!(engine.history().len(), 1);
        assert!(engine.reward_offer().is_empty());
    }

    #[test]
    fn test_enemy_win_ends_run() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["OO.", "X..", "X.."]));

        engine.play_move(8).unwrap();
        let Outcome::EnemyPlayed(report) = engine.advance_clock(350).unwrap() else {
            panic!("expected the enemy turn");
        };
        assert_eq!(report.moves[0].index, 2);
        assert_eq!(report.fight_end, Some(FightEnd::Lost));
        assert_eq!(engine.phase(), Phase::GameOver);

        assert_eq!(engine.play_move(4), Err(Rejection::WrongPhase(Phase::GameOver)));
        assert!(matches!(engine.restart_run(), Ok(Outcome::RunStarted { floor: 1, .. })));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.board().size(), 3);
    }

    #[test]
    fn test_thorns_scores_for_enemy_in_score_mode() {
        let mut engine = engine(Mode::Score);
        engine.run.fight.encounter = EncounterId::BrambleWarden.encounter();
        engine.run.fight.params.thorns_chance = 1.0;

        let mut board = Board::new(8).unwrap();
        board.set(0, Cell::Mark(Side::O));
        board.set(1, Cell::Mark(Side::O));
        set_board(&mut engine, board);
        // Only cells 2 and 63 stay playable
        for i in 3..63 {
            engine.run.fight.locks.lock(i, 5);
        }

        let Outcome::Played(report) = engine.play_move(63).unwrap() else {
            panic!("expected a player move");
        };
        assert_eq!(report.passives, vec![PassiveEvent::Thorns { index: 2 }]);
        assert_eq!(engine.ledger().score(Side::ENEMY), 1);
        assert_eq!(engine.ledger().score(Side::PLAYER), 0);
        assert_eq!(engine.history().last().unwrap().get(2), Some(Cell::Mark(Side::O)));
        assert_eq!(report.fight_end, None);
    }

    #[test]
    fn test_double_tap_skipped_after_winning_move() {
        let mut engine = engine(Mode::Classic);
        engine.run.fight.encounter = EncounterId::TwinFang.encounter();
        engine.run.fight.params.double_tap_chance = 1.0;
        set_board(&mut engine, board_from(&["OO.", "X..", "X.."]));
        let history_before = engine.history().len();

        engine.play_move(8).unwrap();
        let Outcome::EnemyPlayed(report) = engine.advance_clock(350).unwrap() else {
            panic!("expected the enemy turn");
        };
        assert_eq!(report.moves.len(), 1);
        assert_eq!(report.moves[0].index, 2);
        assert!(!report.passives.contains(&PassiveEvent::DoubleTap));
        assert_eq!(report.fight_end, Some(FightEnd::Lost));
        assert_eq!(engine.phase(), Phase::GameOver);
        // Player move and the winning enemy move only
        assert_eq!(engine.history().len(), history_before + 2);
    }

    #[test]
    fn test_classic_full_board_restarts_fight() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["XOX", "XOO", "OX."]));
        let generation = engine.generation();

        let Outcome::Played(report) = engine.play_move(8).unwrap() else {
            panic!("expected a played move");
        };
        assert_eq!(report.fight_end, Some(FightEnd::Restarted));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.floor(), 1);
        assert_eq!(engine.board().empty_cells().count(), 9);
        assert_eq!(engine.history().len(), 1);
        assert!(engine.generation() > generation);
        assert!(!engine.is_enemy_thinking());
    }

    #[test]
    fn test_score_mode_threshold_win() {
        let mut engine = engine(Mode::Score);
        let mut board = engine.board().clone();
        for i in 0..6 {
            board.set(i, Cell::Mark(Side::X));
            engine.run.fight.ledger.score_placement(&board, i, Side::X);
        }
        assert_eq!(engine.ledger().score(Side::X), 4);
        set_board(&mut engine, board);

        let Outcome::Played(report) = engine.play_move(6).unwrap() else {
            panic!("expected a played move");
        };
        assert_eq!(report.moves[0].score_delta, Some(1));
        assert_eq!(report.fight_end, Some(FightEnd::Won));
        assert_eq!(engine.phase(), Phase::Reward);
    }

    #[test]
    fn test_score_mode_tie_and_rematch() {
        let mut engine = engine(Mode::Score);
        // 2-wide stripes shifted per row: no run longer than two anywhere
        let cells = (0..64)
            .map(|i| {
                let (r, c) = (i / 8, i % 8);
                match (i, (c / 2 + r) % 2) {
                    (63, _) => Cell::Empty,
                    (_, 0) => Cell::Mark(Side::X),
                    _ => Cell::Mark(Side::O),
                }
            })
            .collect();
        set_board(&mut engine, Board::from_cells(cells).unwrap());

        let Outcome::Played(report) = engine.play_move(63).unwrap() else {
            panic!("expected a played move");
        };
        assert_eq!(report.moves[0].score_delta, Some(0));
        assert_eq!(report.fight_end, Some(FightEnd::Drawn));
        assert_eq!(engine.phase(), Phase::Draw);

        assert_eq!(engine.rematch(), Ok(Outcome::Rematch { floor: 1 }));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.board().empty_cells().count(), 64);
        assert_eq!(engine.encounter().id, EncounterId::Jailer);
    }

    #[test]
    fn test_card_arming_rules() {
        let mut engine = engine(Mode::Classic);

        assert_eq!(engine.arm_card(CardKind::Shield), Ok(Outcome::CardArmed(CardKind::Shield)));
        assert_eq!(engine.arm_card(CardKind::Shield), Ok(Outcome::CardDisarmed));
        assert_eq!(engine.pending_card(), None);
        assert_eq!(engine.clear_card_selection(), Err(Rejection::NoPendingCard));
        assert_eq!(engine.target_cell(0), Err(Rejection::NoPendingCard));

        engine.arm_card(CardKind::Erase).unwrap();
        assert_eq!(engine.arm_card(CardKind::Swap), Ok(Outcome::CardArmed(CardKind::Swap)));
        assert_eq!(engine.pending_card().map(|p| p.kind), Some(CardKind::Swap));
        assert_eq!(engine.clear_card_selection(), Ok(Outcome::CardDisarmed));

        engine.run.hand = Hand::empty();
        assert_eq!(engine.arm_card(CardKind::Erase), Err(Rejection::CardNotOwned));
    }

    #[test]
    fn test_erase_on_empty_fizzles_at_no_cost() {
        let mut engine = engine(Mode::Classic);
        engine.arm_card(CardKind::Erase).unwrap();

        let outcome = engine.target_cell(4).unwrap();
        assert_eq!(
            outcome,
            Outcome::CardFizzled {
                kind: CardKind::Erase,
                reason: Rejection::InvalidTarget,
            }
        );
        assert_eq!(engine.energy().current(), 1);
        assert_eq!(engine.hand().get(CardKind::Erase).unwrap().charges, 1);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.pending_card(), None);
    }

    #[test]
    fn test_erase_spends_and_keeps_turn() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["O..", "...", "..."]));
        let history = engine.history().len();

        engine.arm_card(CardKind::Erase).unwrap();
        assert_eq!(
            engine.target_cell(0),
            Ok(Outcome::CardResolved {
                kind: CardKind::Erase,
                board_changed: true,
                fight_end: None,
            })
        );
        assert_eq!(engine.board().get(0), Some(Cell::Empty));
        assert_eq!(engine.energy().current(), 0);
        assert_eq!(engine.hand().get(CardKind::Erase).unwrap().charges, 0);
        assert_eq!(engine.history().len(), history + 1);
        assert_eq!(engine.turn(), Side::PLAYER);

        assert_eq!(
            engine.arm_card(CardKind::Swap),
            Err(Rejection::InsufficientEnergy { needed: 1, available: 0 })
        );
    }

    #[test]
    fn test_out_of_range_target_keeps_selection() {
        let mut engine = engine(Mode::Classic);
        engine.arm_card(CardKind::Swap).unwrap();
        assert_eq!(
            engine.target_cell(0),
            Ok(Outcome::TargetAdded { kind: CardKind::Swap, remaining: 1 })
        );
        assert_eq!(
            engine.target_cell(42),
            Err(Rejection::OutOfRange { index: 42, cells: 9 })
        );
        assert_eq!(engine.pending_card().unwrap().targets.as_slice(), &[0]);
    }

    #[test]
    fn test_swap_completing_line_wins() {
        let mut engine = engine(Mode::Classic);
        set_board(&mut engine, board_from(&["XX.", "..X", "O.."]));

        engine.arm_card(CardKind::Swap).unwrap();
        engine.target_cell(2).unwrap();
        let Outcome::CardResolved { fight_end, .. } = engine.target_cell(5).unwrap() else {
            panic!("expected a resolved card");
        };
        assert_eq!(fight_end, Some(FightEnd::Won));
        assert_eq!(engine.phase(), Phase::Reward);
    }

    #[test]
    fn test_shield_does_not_append_history() {
        let mut engine = engine(Mode::Classic);
        engine.arm_card(CardKind::Shield).unwrap();
        let Outcome::CardResolved { board_changed, .. } = engine.target_cell(4).unwrap() else {
            panic!("expected a resolved card");
        };
        assert!(!board_changed);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.locks().remaining(4), 2);
        assert_eq!(engine.play_move(4), Err(Rejection::CellLocked(4)));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = engine(Mode::Score);
        engine.play_move(0).unwrap();
        let snap = engine.snapshot();

        assert_eq!(snap.mode, Mode::Score);
        assert_eq!(snap.turn, Side::ENEMY);
        assert!(snap.enemy_thinking);
        assert_eq!(snap.history_len, 2);
        assert_eq!(snap.encounter.name, "Jailer");
        assert_eq!(
            snap.last_move,
            Some(LastMove {
                side: Side::X,
                index: 0,
                score_delta: Some(0),
            })
        );
    }
}
