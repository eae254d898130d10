use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime};

use chrono::Utc;
use log::{error, info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::destroyable::Destroyable;
use crate::events::{CancellationToken, EventEmitter, EventObserver, TaskQueue, Unsubscriber};
use crate::game::data_io;
use crate::game::scoring;
use crate::game::settings::Settings;
use crate::game::stats_manager::StatsManager;
use crate::game::storage::Storage;
use crate::helpers::format_time;
use crate::model::{
    Difficulty, EngineCommand, EngineEvent, GameSession, GameSummary, InputOutcome, Mode,
    NotificationKind, PairResolution, PuzzleBoard, PuzzleInput, QualifyingAction, SettingsChange,
    SoundCue,
};

/// How long a memory mismatch or a missed word selection stays visible
/// before the deferred reveal resets it.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    ResolveMemoryPair,
    ClearWordSelection,
}

/// The application context: owns the active session and board, the
/// settings, and the statistics pipeline. Driven entirely by
/// `EngineCommand`s from its observer; talks back through `EngineEvent`s.
pub struct GameController {
    session: Option<GameSession>,
    board: Option<PuzzleBoard>,
    rng: StdRng,
    settings: Settings,
    stats: StatsManager,
    storage: Rc<RefCell<dyn Storage>>,
    tasks: TaskQueue<DeferredAction>,
    pending_selection_clear: Option<CancellationToken>,
    event_emitter: EventEmitter<EngineEvent>,
    subscription: Option<Unsubscriber<EngineCommand>>,
}

impl Destroyable for GameController {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameController {
    pub fn new(
        command_observer: EventObserver<EngineCommand>,
        event_emitter: EventEmitter<EngineEvent>,
        storage: Rc<RefCell<dyn Storage>>,
    ) -> Rc<RefCell<Self>> {
        let settings = Settings::load(&*storage.borrow());
        let stats = StatsManager::new(Rc::clone(&storage));
        let controller = Self {
            session: None,
            board: None,
            rng: StdRng::seed_from_u64(rand::rng().next_u64()),
            settings,
            stats,
            storage,
            tasks: TaskQueue::new(),
            pending_selection_clear: None,
            event_emitter,
            subscription: None,
        };
        let refcell = Rc::new(RefCell::new(controller));
        GameController::wire_subscription(refcell.clone(), command_observer);
        refcell
    }

    fn wire_subscription(
        controller: Rc<RefCell<Self>>,
        command_observer: EventObserver<EngineCommand>,
    ) {
        let handler = controller.clone();
        let subscription = command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        controller.borrow_mut().subscription = Some(subscription);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn statistics(&self) -> &crate::model::Statistics {
        self.stats.stats()
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    fn handle_command(&mut self, command: EngineCommand) {
        trace!(target: "controller", "Handling command: {:?}", command);
        match command {
            EngineCommand::NewGame(mode, difficulty, seed) => {
                self.start_game(mode, difficulty, seed)
            }
            EngineCommand::AttemptMove(index) => self.handle_input(PuzzleInput::MoveTile(index)),
            EngineCommand::AttemptPlace { piece, x, y } => {
                self.handle_input(PuzzleInput::PlacePiece { piece, x, y })
            }
            EngineCommand::Flip(card) => self.handle_input(PuzzleInput::FlipCard(card)),
            EngineCommand::ToggleCell { row, col } => {
                self.handle_input(PuzzleInput::ToggleCell { row, col })
            }
            EngineCommand::Shuffle => self.shuffle_board(),
            EngineCommand::ShowHint => self.show_hint(),
            EngineCommand::Pause => self.pause_game(),
            EngineCommand::Resume => self.resume_game(),
            EngineCommand::Tick(now) => self.tick(now),
            EngineCommand::BackToMenu => self.back_to_menu(),
            EngineCommand::ExportData => self.export_data(),
            EngineCommand::ImportData(blob) => self.import_data(&blob),
            EngineCommand::ResetData => self.reset_data(),
            EngineCommand::ChangeSettings(change) => self.change_settings(change),
        }
    }

    fn start_game(&mut self, mode: Mode, difficulty: Difficulty, seed: Option<u64>) {
        let seed = seed
            .or_else(Settings::seed_from_env)
            .unwrap_or_else(|| rand::rng().next_u64());
        info!(
            target: "controller",
            "New game; mode: {:?}; difficulty: {}; seed: {}",
            mode,
            difficulty.value(),
            seed
        );
        self.tasks.cancel_all();
        self.pending_selection_clear = None;
        self.rng = StdRng::seed_from_u64(seed);
        let board = PuzzleBoard::for_mode(mode, difficulty, &mut self.rng);
        let progress = board.progress_percent();
        let session = GameSession::new(mode, difficulty, seed);
        let timer = session.timer.clone();
        self.board = Some(board);
        self.session = Some(session);

        self.emit(EngineEvent::SessionStarted { mode, difficulty });
        self.emit(EngineEvent::ScoreChanged(0));
        self.emit(EngineEvent::MovesChanged(0));
        self.emit(EngineEvent::ProgressChanged(progress));
        self.emit(EngineEvent::TimerStateChanged(timer));
        self.emit(EngineEvent::ClockUpdated(format_time(Duration::ZERO)));
    }

    fn input_allowed(&self) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| session.is_active && !session.is_paused())
    }

    fn handle_input(&mut self, input: PuzzleInput) {
        if !self.input_allowed() {
            return;
        }
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let outcome = board.attempt_input(input);
        trace!(target: "controller", "Input {:?} -> {:?}", input, outcome);
        match outcome {
            InputOutcome::Ignored => {}
            InputOutcome::Rejected => self.play(SoundCue::Error),
            InputOutcome::Changed => {}
            InputOutcome::Qualifying(action) => self.apply_qualifying(action),
            InputOutcome::PairFlipped => self.open_memory_resolution(),
            InputOutcome::SelectionMissed => self.defer_selection_clear(),
        }
    }

    /// A scoring action: bump the move counter (matches score at the
    /// pair flip instead), award points, refresh progress, check win.
    fn apply_qualifying(&mut self, action: QualifyingAction) {
        let cue = match action {
            QualifyingAction::TileMoved => SoundCue::Move,
            _ => SoundCue::Success,
        };
        if matches!(action, QualifyingAction::WordFound(_)) {
            // the find resolves any earlier miss; its clear must not
            // wipe a selection the player starts next
            if let Some(pending) = self.pending_selection_clear.take() {
                pending.cancel();
            }
        }
        let counts_move = !matches!(action, QualifyingAction::PairMatched);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if counts_move {
            session.moves += 1;
        }
        session.score += scoring::action_score(session.difficulty, session.timer.elapsed());
        let (score, moves) = (session.score, session.moves);
        let progress = self
            .board
            .as_ref()
            .map_or(0.0, PuzzleBoard::progress_percent);

        self.emit(EngineEvent::ScoreChanged(score));
        self.emit(EngineEvent::MovesChanged(moves));
        self.emit(EngineEvent::ProgressChanged(progress));
        self.play(cue);
        self.check_win();
    }

    /// Second memory card is up: the move counts now, the verdict waits
    /// for the reveal window.
    fn open_memory_resolution(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.moves += 1;
        let moves = session.moves;
        self.emit(EngineEvent::MovesChanged(moves));
        self.play(SoundCue::Move);
        self.tasks.schedule(
            Instant::now() + REVEAL_DELAY,
            DeferredAction::ResolveMemoryPair,
        );
    }

    /// A ≥3-cell selection matched nothing. The selection may still grow
    /// into a longer target, so input stays open; only the newest miss
    /// keeps a pending clear.
    fn defer_selection_clear(&mut self) {
        if let Some(pending) = self.pending_selection_clear.take() {
            pending.cancel();
        }
        let token = self.tasks.schedule(
            Instant::now() + REVEAL_DELAY,
            DeferredAction::ClearWordSelection,
        );
        self.pending_selection_clear = Some(token);
    }

    fn tick(&mut self, now: Instant) {
        for action in self.tasks.fire_due(now) {
            match action {
                DeferredAction::ResolveMemoryPair => self.resolve_memory_pair(),
                DeferredAction::ClearWordSelection => self.clear_word_selection(),
            }
        }
        if let Some(session) = self.session.as_ref() {
            if session.is_active && !session.is_paused() {
                let clock = format_time(session.elapsed());
                self.emit(EngineEvent::ClockUpdated(clock));
            }
        }
    }

    fn resolve_memory_pair(&mut self) {
        let Some(memory) = self.board.as_mut().and_then(PuzzleBoard::memory_mut) else {
            return;
        };
        let resolution = memory.resolve_pair();
        memory.finish_resolution();
        match resolution {
            Some(PairResolution::Matched) => {
                self.apply_qualifying(QualifyingAction::PairMatched)
            }
            Some(PairResolution::Mismatched) => self.play(SoundCue::Error),
            None => {}
        }
    }

    fn clear_word_selection(&mut self) {
        self.pending_selection_clear = None;
        if let Some(word) = self.board.as_mut().and_then(PuzzleBoard::word_mut) {
            word.clear_selection();
        }
    }

    fn check_win(&mut self) {
        if !self.board.as_ref().map_or(false, PuzzleBoard::check_win) {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_active {
            return;
        }
        session.is_active = false;
        session.timer = session.timer.ended(SystemTime::now());
        let summary = GameSummary {
            mode: session.mode,
            difficulty: session.difficulty,
            score: session.score,
            moves: session.moves,
            elapsed: session.timer.elapsed(),
            finished_at: Utc::now(),
            playthrough_id: session.playthrough_id,
        };
        let timer = session.timer.clone();
        info!(
            target: "controller",
            "Puzzle completed; mode: {:?}; score: {}; time: {}",
            summary.mode,
            summary.score,
            format_time(summary.elapsed)
        );

        self.emit(EngineEvent::TimerStateChanged(timer));
        self.play(SoundCue::Victory);
        let outcome = self.stats.record_game(&summary);
        let mode = summary.mode;
        self.emit(EngineEvent::GameWon(summary));

        if let Some(level_up) = outcome.level_up {
            self.play(SoundCue::LevelUp);
            self.emit(EngineEvent::LevelUp {
                mode,
                level: level_up.to,
            });
        }
        if !outcome.unlocked.is_empty() {
            self.play(SoundCue::Achievement);
            self.emit(EngineEvent::AchievementsUnlocked(outcome.unlocked));
        }
    }

    fn shuffle_board(&mut self) {
        if !self.input_allowed() {
            return;
        }
        self.tasks.cancel_all();
        self.pending_selection_clear = None;
        let Some(board) = self.board.as_mut() else {
            return;
        };
        board.shuffle(&mut self.rng);
        let progress = board.progress_percent();
        self.emit(EngineEvent::ProgressChanged(progress));
        self.play(SoundCue::Move);
    }

    fn show_hint(&mut self) {
        if !self.settings.show_hints || !self.input_allowed() {
            return;
        }
        let Some(mode) = self.board.as_ref().map(PuzzleBoard::mode) else {
            return;
        };
        let text = match mode {
            Mode::Sliding => "Solve the top row first, then work column by column.",
            Mode::Jigsaw => "Drag each piece fully inside the board frame.",
            Mode::Memory => "Track the symbols you have already revealed.",
            Mode::Word => "Words read forwards or backwards through the letters you pick.",
        };
        self.play(SoundCue::Move);
        self.emit(EngineEvent::HintShown(text.to_string()));
    }

    fn pause_game(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_active || session.is_paused() {
            return;
        }
        session.timer = session.timer.paused(SystemTime::now());
        let timer = session.timer.clone();
        self.emit(EngineEvent::TimerStateChanged(timer));
        self.notify("Game Paused", NotificationKind::Info);
    }

    fn resume_game(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_paused() {
            return;
        }
        session.timer = session.timer.resumed(SystemTime::now());
        let timer = session.timer.clone();
        self.emit(EngineEvent::TimerStateChanged(timer));
        self.notify("Game Resumed", NotificationKind::Success);
    }

    fn back_to_menu(&mut self) {
        self.tasks.cancel_all();
        self.pending_selection_clear = None;
        self.session = None;
        self.board = None;
        trace!(target: "controller", "Returned to menu; session discarded");
    }

    fn export_data(&mut self) {
        match data_io::export_blob(self.stats.stats(), &self.settings, Utc::now()) {
            Ok(blob) => {
                self.emit(EngineEvent::DataExported(blob));
                self.notify("Game data exported successfully!", NotificationKind::Success);
            }
            Err(err) => {
                error!(target: "controller", "Export failed: {}", err);
                self.notify("Export failed!", NotificationKind::Error);
            }
        }
    }

    fn import_data(&mut self, blob: &str) {
        match data_io::import_blob(blob) {
            Ok(data) => {
                self.stats.replace(data.stats);
                self.settings = data.settings;
                self.settings.save(&mut *self.storage.borrow_mut());
                let settings = self.settings.clone();
                self.emit(EngineEvent::SettingsChanged(settings));
                self.notify("Game data imported successfully!", NotificationKind::Success);
            }
            Err(err) => {
                error!(target: "controller", "Import rejected: {}", err);
                self.notify("Invalid game data file!", NotificationKind::Error);
            }
        }
    }

    fn reset_data(&mut self) {
        self.stats.reset();
        self.settings = Settings::default();
        self.settings.save(&mut *self.storage.borrow_mut());
        let settings = self.settings.clone();
        self.emit(EngineEvent::SettingsChanged(settings));
        self.notify("All game data has been reset!", NotificationKind::Success);
    }

    fn change_settings(&mut self, change: SettingsChange) {
        if let Some(sound_enabled) = change.sound_enabled {
            self.settings.sound_enabled = sound_enabled;
        }
        if let Some(show_hints) = change.show_hints {
            self.settings.show_hints = show_hints;
        }
        if let Some(theme) = change.theme {
            self.settings.theme = theme;
        }
        if let Some(animation_speed) = change.animation_speed {
            self.settings.animation_speed = animation_speed;
        }
        self.settings.save(&mut *self.storage.borrow_mut());
        let settings = self.settings.clone();
        self.emit(EngineEvent::SettingsChanged(settings));
    }

    fn emit(&self, event: EngineEvent) {
        self.event_emitter.emit(&event);
    }

    fn play(&self, cue: SoundCue) {
        if self.settings.sound_enabled {
            self.emit(EngineEvent::Sound(cue));
        }
    }

    fn notify(&self, message: &str, kind: NotificationKind) {
        self.emit(EngineEvent::Notification {
            message: message.to_string(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::game::storage::MemoryStorage;
    use crate::model::{AchievementId, SlidingBoard};
    use test_context::test_context;

    use crate::game::tests::UsingLogger;

    struct Harness {
        controller: Rc<RefCell<GameController>>,
        commands: EventEmitter<EngineCommand>,
        events: Rc<RefCell<Vec<EngineEvent>>>,
    }

    fn harness() -> Harness {
        let (command_emitter, command_observer) = Channel::<EngineCommand>::new();
        let (event_emitter, event_observer) = Channel::<EngineEvent>::new();
        let storage: Rc<RefCell<dyn Storage>> = Rc::new(RefCell::new(MemoryStorage::new()));
        let controller = GameController::new(command_observer, event_emitter, storage);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        // the observer half stays alive inside the closure's channel clone
        let _sub = event_observer.subscribe(move |event: &EngineEvent| {
            sink.borrow_mut().push(event.clone());
        });
        Harness {
            controller,
            commands: command_emitter,
            events,
        }
    }

    impl Harness {
        fn send(&self, command: EngineCommand) {
            self.commands.emit(&command);
        }

        fn events(&self) -> Vec<EngineEvent> {
            self.events.borrow().clone()
        }

        fn sounds(&self) -> Vec<SoundCue> {
            self.events()
                .iter()
                .filter_map(|event| match event {
                    EngineEvent::Sound(cue) => Some(*cue),
                    _ => None,
                })
                .collect()
        }

        /// Swaps in a hand-built sliding board mid-session.
        fn inject_sliding(&self, tiles: Vec<u16>, size: usize) {
            let board = SlidingBoard::from_tiles(tiles, size).unwrap();
            self.controller.borrow_mut().board = Some(PuzzleBoard::Sliding(board));
        }
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_sliding_game_to_completion(_ctx: &mut UsingLogger) {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(4),
            Some(7),
        ));
        // one legal slide away from solved: blank sits before the last tile
        let mut tiles: Vec<u16> = (1..15).collect();
        tiles.push(0);
        tiles.push(15);
        harness.inject_sliding(tiles, 4);

        harness.send(EngineCommand::AttemptMove(15));

        let controller = harness.controller.borrow();
        let session = controller.session().unwrap();
        assert!(!session.is_active, "the session ends at the win");
        assert!(session.score > 0);
        assert_eq!(session.moves, 1);

        let stats = controller.statistics();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.wins, 1);
        assert!(stats.achievements[&AchievementId::FirstGame].unlocked);

        let events = harness.events();
        let wins = events
            .iter()
            .filter(|event| matches!(event, EngineEvent::GameWon(_)))
            .count();
        assert_eq!(wins, 1, "the win fires exactly once");
        assert!(events
            .iter()
            .any(|event| matches!(event, EngineEvent::AchievementsUnlocked(ids)
                if ids.contains(&AchievementId::FirstGame))));
        assert!(harness.sounds().contains(&SoundCue::Victory));
    }

    #[test]
    fn test_illegal_slide_plays_the_error_cue_only() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(3),
            Some(7),
        ));
        harness.inject_sliding(vec![0, 1, 2, 3, 4, 5, 6, 7, 8], 3);

        harness.send(EngineCommand::AttemptMove(8));

        let controller = harness.controller.borrow();
        let session = controller.session().unwrap();
        assert_eq!(session.moves, 0);
        assert_eq!(session.score, 0);
        assert_eq!(harness.sounds().last(), Some(&SoundCue::Error));
    }

    #[test]
    fn test_memory_pair_resolves_after_the_reveal_delay() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Memory,
            Difficulty::new(4),
            Some(21),
        ));

        let (first, second) = {
            let mut controller = harness.controller.borrow_mut();
            let memory = controller.board.as_mut().unwrap().memory_mut().unwrap();
            let symbol = memory.cards()[0].symbol;
            let partner = memory
                .cards()
                .iter()
                .skip(1)
                .position(|c| c.symbol == symbol)
                .unwrap()
                + 1;
            (0, partner)
        };
        harness.send(EngineCommand::Flip(first));
        harness.send(EngineCommand::Flip(second));
        {
            let controller = harness.controller.borrow();
            assert_eq!(controller.session().unwrap().moves, 1);
            assert_eq!(controller.session().unwrap().score, 0, "verdict pending");
        }

        harness.send(EngineCommand::Tick(Instant::now() + REVEAL_DELAY));

        let controller = harness.controller.borrow();
        assert!(controller.session().unwrap().score > 0);
        assert!(harness.sounds().contains(&SoundCue::Success));
    }

    #[test]
    fn test_new_game_cancels_a_pending_reveal() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Memory,
            Difficulty::new(4),
            Some(21),
        ));
        let (first, second) = {
            let controller = harness.controller.borrow();
            let board = controller.board.as_ref().unwrap();
            let PuzzleBoard::Memory(memory) = board else {
                panic!("memory board expected")
            };
            let symbol = memory.cards()[0].symbol;
            let other = memory
                .cards()
                .iter()
                .position(|c| c.symbol != symbol)
                .unwrap();
            (0, other)
        };
        harness.send(EngineCommand::Flip(first));
        harness.send(EngineCommand::Flip(second));

        // restart before the reveal window closes; the stale task must
        // not touch the fresh board
        harness.send(EngineCommand::NewGame(
            Mode::Memory,
            Difficulty::new(4),
            Some(22),
        ));
        harness.send(EngineCommand::Tick(Instant::now() + REVEAL_DELAY * 2));

        let controller = harness.controller.borrow();
        let board = controller.board.as_ref().unwrap();
        let PuzzleBoard::Memory(memory) = board else {
            panic!("memory board expected")
        };
        assert!(memory.cards().iter().all(|c| !c.face_up));
        assert!(!memory.is_processing());
        assert_eq!(controller.session().unwrap().score, 0);
    }

    #[test]
    fn test_word_miss_clears_after_delay_but_allows_building() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Word,
            Difficulty::new(8),
            Some(13),
        ));
        // spell PUZZLE across three misses; no clear fires in between
        for col in 0..6 {
            harness.send(EngineCommand::ToggleCell { row: 0, col });
        }
        {
            let controller = harness.controller.borrow();
            let session = controller.session().unwrap();
            assert!(session.score > 0, "the full word was found");
            assert_eq!(session.moves, 1);
        }

        // a fresh miss left alone clears once the window elapses
        for col in 0..3 {
            harness.send(EngineCommand::ToggleCell { row: 1, col });
        }
        harness.send(EngineCommand::Tick(Instant::now() + REVEAL_DELAY));
        let mut controller = harness.controller.borrow_mut();
        let word = controller.board.as_mut().unwrap().word_mut().unwrap();
        assert!(word.selection_text().is_empty());
    }

    #[test]
    fn test_pause_blocks_input_until_resume() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(3),
            Some(7),
        ));
        harness.inject_sliding(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], 3);

        harness.send(EngineCommand::Pause);
        harness.send(EngineCommand::AttemptMove(8));
        assert_eq!(harness.controller.borrow().session().unwrap().moves, 0);

        harness.send(EngineCommand::Resume);
        harness.send(EngineCommand::AttemptMove(8));
        let controller = harness.controller.borrow();
        assert_eq!(controller.session().unwrap().moves, 1);
        assert!(!controller.session().unwrap().is_active, "that slide won");
    }

    #[test]
    fn test_import_rejection_leaves_state_untouched() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(4),
            Some(7),
        ));
        harness.inject_sliding(
            {
                let mut tiles: Vec<u16> = (1..15).collect();
                tiles.push(0);
                tiles.push(15);
                tiles
            },
            4,
        );
        harness.send(EngineCommand::AttemptMove(15));
        assert_eq!(harness.controller.borrow().statistics().games_played, 1);

        let blob = r#"{"stats":{"gamesPlayed":99},"settings":{"showHints":false}}"#.to_string();
        harness.send(EngineCommand::ImportData(blob));

        let controller = harness.controller.borrow();
        assert_eq!(
            controller.statistics().games_played,
            1,
            "rejected import must not merge"
        );
        assert!(controller.settings().show_hints);
        assert!(harness.events().iter().any(|event| matches!(
            event,
            EngineEvent::Notification {
                kind: NotificationKind::Error,
                ..
            }
        )));
    }

    #[test]
    fn test_export_then_import_round_trips_through_commands() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(4),
            Some(7),
        ));
        harness.inject_sliding(
            {
                let mut tiles: Vec<u16> = (1..15).collect();
                tiles.push(0);
                tiles.push(15);
                tiles
            },
            4,
        );
        harness.send(EngineCommand::AttemptMove(15));

        harness.send(EngineCommand::ExportData);
        let blob = harness
            .events()
            .iter()
            .find_map(|event| match event {
                EngineEvent::DataExported(blob) => Some(blob.clone()),
                _ => None,
            })
            .expect("export emits the blob");

        harness.send(EngineCommand::ResetData);
        assert_eq!(harness.controller.borrow().statistics().games_played, 0);

        harness.send(EngineCommand::ImportData(blob));
        assert_eq!(harness.controller.borrow().statistics().games_played, 1);
    }

    #[test]
    fn test_sound_cues_respect_the_setting() {
        let harness = harness();
        harness.send(EngineCommand::ChangeSettings(SettingsChange {
            sound_enabled: Some(false),
            ..Default::default()
        }));
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(3),
            Some(7),
        ));
        harness.inject_sliding(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], 3);
        harness.send(EngineCommand::AttemptMove(8));
        assert!(harness.sounds().is_empty());
    }

    #[test]
    fn test_shuffle_resets_word_progress() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Word,
            Difficulty::new(8),
            Some(13),
        ));
        for col in 0..6 {
            harness.send(EngineCommand::ToggleCell { row: 0, col });
        }
        harness.send(EngineCommand::Shuffle);
        let mut controller = harness.controller.borrow_mut();
        let word = controller.board.as_mut().unwrap().word_mut().unwrap();
        assert_eq!(word.found_count(), 0);
    }

    #[test]
    fn test_hint_respects_the_setting() {
        let harness = harness();
        harness.send(EngineCommand::NewGame(
            Mode::Memory,
            Difficulty::new(4),
            Some(21),
        ));
        harness.send(EngineCommand::ShowHint);
        assert!(harness
            .events()
            .iter()
            .any(|event| matches!(event, EngineEvent::HintShown(_))));

        harness.send(EngineCommand::ChangeSettings(SettingsChange {
            show_hints: Some(false),
            ..Default::default()
        }));
        let before = harness.events().len();
        harness.send(EngineCommand::ShowHint);
        assert_eq!(harness.events().len(), before, "hints are off");
    }

    #[test]
    fn test_destroy_detaches_the_command_subscription() {
        let harness = harness();
        harness.controller.borrow_mut().destroy();
        harness.send(EngineCommand::NewGame(
            Mode::Sliding,
            Difficulty::new(4),
            None,
        ));
        assert!(harness.controller.borrow().session().is_none());
    }
}
