//! Arcade front-end state: which screen is up, what it has selected, and how
//! commands move between screens.
//!
//! The app owns the profile service, the running [`SessionDriver`] and the
//! route queue the rewards handler writes into. Rendering code only reads it.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::core::{Game, SharedNotifier, SimpleRng, HUB_ENTRIES};
use crate::driver::{DriverStep, SessionDriver};
use crate::profile::{
    Leaderboard, Profile, ProfileService, ProfileStore, RankedStudent, Scope, SignUp,
    AVATAR_CHOICES,
};
use crate::rewards::{RewardsHandler, RouteQueue};
use crate::types::{
    Command, CompletionReport, Difficulty, GameKind, InputMode, WasteBin, HUB_ROUTE,
};

/// Distance (in field percent) within which a click cleans a pollutant.
pub const CLEAN_RADIUS: f32 = 8.0;

const AIM_STEP: f32 = 5.0;
const MEMORY_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Hub,
    Game(GameKind),
    Leaderboard,
    Profile,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim().trim_end_matches('/');
        match path {
            "" | "/home" | HUB_ROUTE => Some(Route::Hub),
            "/leaderboard" => Some(Route::Leaderboard),
            "/profile" => Some(Route::Profile),
            _ => path
                .strip_prefix("/games/")
                .and_then(GameKind::from_str)
                .map(Route::Game),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Hub => HUB_ROUTE.to_string(),
            Route::Game(kind) => format!("{HUB_ROUTE}/{}", kind.as_str()),
            Route::Leaderboard => "/leaderboard".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Hub,
    DifficultyPicker,
    Playing,
    Result(CompletionReport),
    Leaderboard,
    Profile,
    SignUp,
    Login,
}

#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    pub scope: Scope,
    pub group: usize,
    pub query: String,
    pub searching: bool,
}

/// Sign-up form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
    Confirm,
    Age,
    Avatar,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Password,
        FormField::Confirm,
        FormField::Age,
        FormField::Avatar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::Confirm => "Confirm",
            FormField::Age => "Age",
            FormField::Avatar => "Avatar",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    /// Digits only; blank means not given.
    pub age: String,
    /// Index into [`AVATAR_CHOICES`]; `None` until the player picks one.
    pub avatar: Option<usize>,
    pub focus: usize,
}

impl SignUpForm {
    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus.min(FormField::ALL.len() - 1)]
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focused() {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::Confirm => Some(&mut self.confirm),
            FormField::Age => Some(&mut self.age),
            FormField::Avatar => None,
        }
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Email => self.email.clone(),
            FormField::Password => "*".repeat(self.password.chars().count()),
            FormField::Confirm => "*".repeat(self.confirm.chars().count()),
            FormField::Age => self.age.clone(),
            FormField::Avatar => self
                .avatar
                .and_then(|i| AVATAR_CHOICES.get(i))
                .map(|a| a.to_string())
                .unwrap_or_default(),
        }
    }

    fn to_request(&self) -> SignUp {
        SignUp {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm.clone(),
            age: self.age.trim().parse().ok(),
            avatar: self
                .avatar
                .and_then(|i| AVATAR_CHOICES.get(i))
                .map(|a| a.to_string()),
            ..SignUp::default()
        }
    }
}

pub struct App<S: ProfileStore + 'static> {
    profile: Arc<Mutex<ProfileService<S>>>,
    routes: Arc<RouteQueue>,
    notifier: SharedNotifier,
    seeds: SimpleRng,
    screen: Screen,
    driver: Option<SessionDriver>,
    return_route: Option<Route>,
    hub_selected: usize,
    menu_selected: usize,
    difficulty: Difficulty,
    cursor: usize,
    aim: (f32, f32),
    message: Option<String>,
    board: Leaderboard,
    board_view: LeaderboardView,
    form: SignUpForm,
    login_email: String,
    quit: bool,
}

impl<S: ProfileStore + 'static> App<S> {
    pub fn new(service: ProfileService<S>, seed: u32) -> Self {
        let profile = Arc::new(Mutex::new(service));
        let routes = Arc::new(RouteQueue::new());
        let notifier: SharedNotifier =
            Arc::new(RewardsHandler::new(Arc::clone(&profile), routes.clone()));
        Self {
            profile,
            routes,
            notifier,
            seeds: SimpleRng::new(seed),
            screen: Screen::Hub,
            driver: None,
            return_route: None,
            hub_selected: 0,
            menu_selected: 0,
            difficulty: Difficulty::default(),
            cursor: 0,
            aim: (50.0, 50.0),
            message: None,
            board: Leaderboard::default(),
            board_view: LeaderboardView::default(),
            form: SignUpForm::default(),
            login_email: String::new(),
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn game(&self) -> Option<&Game> {
        self.driver.as_ref().map(|d| d.game())
    }

    pub fn hub_selected(&self) -> usize {
        self.hub_selected
    }

    pub fn menu_selected(&self) -> usize {
        self.menu_selected
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Bin, card or option under the cursor, depending on the game.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cleanup crosshair in field percent.
    pub fn aim(&self) -> (f32, f32) {
        self.aim
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn form(&self) -> &SignUpForm {
        &self.form
    }

    pub fn login_email(&self) -> &str {
        &self.login_email
    }

    pub fn leaderboard_view(&self) -> &LeaderboardView {
        &self.board_view
    }

    pub fn leaderboard_groups(&self) -> Vec<&str> {
        self.board.groups(self.board_view.scope)
    }

    pub fn leaderboard_group(&self) -> Option<&str> {
        self.leaderboard_groups().get(self.board_view.group).copied()
    }

    pub fn leaderboard_rows(&self) -> Vec<RankedStudent> {
        match self.leaderboard_group() {
            Some(group) => self
                .board
                .rank(self.board_view.scope, group, &self.board_view.query),
            None => Vec::new(),
        }
    }

    /// Copy of the logged-in profile.
    pub fn profile(&self) -> Option<Profile> {
        self.profile
            .lock()
            .ok()
            .and_then(|svc| svc.current().cloned())
    }

    /// Menu entries on the profile screen.
    pub fn profile_menu(&self) -> &'static [&'static str] {
        if self.profile().is_some() {
            &["Back to games", "Log out"]
        } else {
            &["Sign up", "Log in", "Back to games"]
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match self.screen {
            Screen::SignUp | Screen::Login => InputMode::Text,
            Screen::Leaderboard if self.board_view.searching => InputMode::Text,
            _ => InputMode::Navigate,
        }
    }

    pub fn navigate(&mut self, route: Route) {
        log::debug!("navigate {}", route.path());
        self.stop_game();
        self.message = None;
        match route {
            Route::Hub => self.screen = Screen::Hub,
            Route::Leaderboard => {
                self.board = Leaderboard::default();
                if let Some(profile) = self.profile() {
                    self.board.merge_player(&profile);
                }
                self.board_view = LeaderboardView::default();
                self.screen = Screen::Leaderboard;
            }
            Route::Profile => {
                self.menu_selected = 0;
                self.screen = Screen::Profile;
            }
            Route::Game(kind) => self.open_game(kind),
        }
    }

    /// Follow a textual route such as `/games/eco-memory`.
    pub fn navigate_path(&mut self, path: &str) -> Result<()> {
        let route = Route::parse(path).ok_or_else(|| anyhow!("unknown route {path}"))?;
        self.navigate(route);
        Ok(())
    }

    fn stop_game(&mut self) {
        if let Some(driver) = self.driver.as_mut() {
            if driver.game().session().is_active() {
                driver.abandon();
            }
        }
        self.driver = None;
    }

    fn open_game(&mut self, kind: GameKind) {
        let mut driver = SessionDriver::for_kind(kind, self.seeds.next_u32());
        driver.set_notifier(Arc::clone(&self.notifier));
        self.driver = Some(driver);
        self.cursor = 0;
        self.aim = (50.0, 50.0);
        if kind == GameKind::TriviaQuiz {
            self.screen = Screen::DifficultyPicker;
        } else {
            self.begin();
        }
    }

    fn begin(&mut self) {
        let difficulty = self.difficulty;
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        if let Game::Quiz(quiz) = driver.game_mut() {
            quiz.choose_difficulty(difficulty);
        }
        if driver.start() {
            self.screen = Screen::Playing;
            self.cursor = 0;
            self.message = None;
        }
    }

    /// Advance timers by one frame.
    pub fn update(&mut self, elapsed_ms: u32) -> DriverStep {
        let step = match self.driver.as_mut() {
            Some(driver) if self.screen == Screen::Playing => driver.update(elapsed_ms),
            _ => DriverStep::default(),
        };
        if step.finished {
            self.message = Some("Time's up!".to_string());
        }
        self.collect_completion();
        step
    }

    fn collect_completion(&mut self) {
        for path in self.routes.drain() {
            match Route::parse(&path) {
                Some(route) => self.return_route = Some(route),
                None => log::warn!("ignoring unknown route {path}"),
            }
        }
        if self.screen != Screen::Playing {
            return;
        }
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        driver.sync();
        if let Some(report) = driver.game_mut().take_completion() {
            self.screen = Screen::Result(report);
        }
    }

    pub fn handle(&mut self, cmd: Command) {
        if cmd == Command::Quit {
            self.stop_game();
            self.quit = true;
            return;
        }
        match self.screen {
            Screen::Hub => self.handle_hub(cmd),
            Screen::DifficultyPicker => self.handle_picker(cmd),
            Screen::Playing => self.handle_playing(cmd),
            Screen::Result(report) => self.handle_result(cmd, report.game),
            Screen::Leaderboard => self.handle_leaderboard(cmd),
            Screen::Profile => self.handle_profile(cmd),
            Screen::SignUp => self.handle_sign_up(cmd),
            Screen::Login => self.handle_login(cmd),
        }
        self.collect_completion();
    }

    fn handle_hub(&mut self, cmd: Command) {
        let count = HUB_ENTRIES.len();
        match cmd {
            Command::Up | Command::Left => {
                self.hub_selected = (self.hub_selected + count - 1) % count;
            }
            Command::Down | Command::Right => {
                self.hub_selected = (self.hub_selected + 1) % count;
            }
            Command::Digit(n) if (1..=count).contains(&(n as usize)) => {
                self.hub_selected = n as usize - 1;
                self.navigate(Route::Game(HUB_ENTRIES[self.hub_selected].game));
            }
            Command::Select => self.navigate(Route::Game(HUB_ENTRIES[self.hub_selected].game)),
            Command::Leaderboard => self.navigate(Route::Leaderboard),
            Command::Profile => self.navigate(Route::Profile),
            Command::Back => self.quit = true,
            _ => {}
        }
    }

    fn handle_picker(&mut self, cmd: Command) {
        let all = Difficulty::ALL;
        let idx = all.iter().position(|d| *d == self.difficulty).unwrap_or(0);
        match cmd {
            Command::Up | Command::Left => {
                self.difficulty = all[(idx + all.len() - 1) % all.len()];
            }
            Command::Down | Command::Right => self.difficulty = all[(idx + 1) % all.len()],
            Command::Digit(n) if (1..=all.len()).contains(&(n as usize)) => {
                self.difficulty = all[n as usize - 1];
                self.begin();
            }
            Command::Select => self.begin(),
            Command::Back => self.navigate(Route::Hub),
            _ => {}
        }
    }

    fn handle_result(&mut self, cmd: Command, game: GameKind) {
        match cmd {
            Command::Select | Command::Back => {
                let route = self.return_route.take().unwrap_or(Route::Hub);
                self.navigate(route);
            }
            Command::Restart => {
                self.return_route = None;
                self.navigate(Route::Game(game));
            }
            _ => {}
        }
    }

    fn handle_playing(&mut self, cmd: Command) {
        match cmd {
            Command::Back => return self.navigate(Route::Hub),
            Command::Restart => {
                let difficulty = self.difficulty;
                if let Some(driver) = self.driver.as_mut() {
                    if let Game::Quiz(quiz) = driver.game_mut() {
                        quiz.choose_difficulty(difficulty);
                    }
                }
                return self.begin();
            }
            _ => {}
        }
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        let (cursor, aim) = (&mut self.cursor, &mut self.aim);
        let message = match driver.game_mut() {
            Game::Sorter(g) => sorter_command(g, cmd, cursor),
            Game::Cleanup(g) => cleanup_command(g, cmd, aim),
            Game::Memory(g) => memory_command(g, cmd, cursor),
            Game::Quiz(g) => quiz_command(g, cmd, cursor),
        };
        if let Some(text) = message {
            self.message = (!text.is_empty()).then_some(text);
        }
        driver.sync();
    }

    fn handle_leaderboard(&mut self, cmd: Command) {
        let view = &mut self.board_view;
        if view.searching {
            match cmd {
                Command::Char(c) => view.query.push(c),
                Command::Backspace => {
                    view.query.pop();
                }
                Command::Select | Command::Back => view.searching = false,
                _ => {}
            }
            return;
        }
        let groups = self.board.groups(view.scope).len().max(1);
        match cmd {
            Command::Left | Command::Up => view.group = (view.group + groups - 1) % groups,
            Command::Right | Command::Down => view.group = (view.group + 1) % groups,
            Command::ToggleScope => {
                view.scope = view.scope.toggle();
                view.group = 0;
            }
            Command::Search => view.searching = true,
            Command::Backspace => view.query.clear(),
            Command::Back => self.navigate(Route::Hub),
            Command::Profile => self.navigate(Route::Profile),
            _ => {}
        }
    }

    fn handle_profile(&mut self, cmd: Command) {
        let items = self.profile_menu().len();
        match cmd {
            Command::Up => self.menu_selected = (self.menu_selected + items - 1) % items,
            Command::Down => self.menu_selected = (self.menu_selected + 1) % items,
            Command::Back => self.navigate(Route::Hub),
            Command::Leaderboard => self.navigate(Route::Leaderboard),
            Command::Select => {
                let logged_in = self.profile().is_some();
                match (logged_in, self.menu_selected) {
                    (true, 1) => self.logout(),
                    (false, 0) => {
                        self.form = SignUpForm::default();
                        self.message = None;
                        self.screen = Screen::SignUp;
                    }
                    (false, 1) => {
                        self.login_email.clear();
                        self.message = None;
                        self.screen = Screen::Login;
                    }
                    _ => self.navigate(Route::Hub),
                }
            }
            _ => {}
        }
    }

    fn logout(&mut self) {
        let result = match self.profile.lock() {
            Ok(mut svc) => svc.logout().map_err(anyhow::Error::from),
            Err(_) => Err(anyhow!("profile lock poisoned")),
        };
        if let Err(err) = result {
            log::error!("logout failed: {err:#}");
        }
        self.menu_selected = 0;
        self.message = Some("Logged out".to_string());
    }

    fn handle_sign_up(&mut self, cmd: Command) {
        let fields = FormField::ALL.len();
        let form = &mut self.form;
        match cmd {
            Command::Up => form.focus = (form.focus + fields - 1) % fields,
            Command::Down => form.focus = (form.focus + 1) % fields,
            Command::Left | Command::Right if form.focused() == FormField::Avatar => {
                let n = AVATAR_CHOICES.len();
                form.avatar = Some(match (form.avatar, cmd) {
                    (None, _) => 0,
                    (Some(i), Command::Left) => (i + n - 1) % n,
                    (Some(i), _) => (i + 1) % n,
                });
            }
            Command::Char(c) if form.focused() == FormField::Age && !c.is_ascii_digit() => {}
            Command::Char(c) => {
                if let Some(field) = form.field_mut() {
                    field.push(c);
                }
            }
            Command::Backspace => {
                if let Some(field) = form.field_mut() {
                    field.pop();
                }
            }
            Command::Back => self.navigate(Route::Profile),
            Command::Select if form.focused() != FormField::Avatar && form.focus + 1 < fields => {
                form.focus += 1;
            }
            Command::Select => self.submit_sign_up(),
            _ => {}
        }
    }

    fn submit_sign_up(&mut self) {
        let request = self.form.to_request();
        let result = match self.profile.lock() {
            Ok(mut svc) => svc
                .sign_up(&request)
                .map(|p| p.name.clone())
                .map_err(anyhow::Error::from),
            Err(_) => Err(anyhow!("profile lock poisoned")),
        };
        match result {
            Ok(name) => {
                self.navigate(Route::Hub);
                self.message = Some(format!("Welcome, {name}!"));
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn handle_login(&mut self, cmd: Command) {
        match cmd {
            Command::Char(c) => self.login_email.push(c),
            Command::Backspace => {
                self.login_email.pop();
            }
            Command::Back => self.navigate(Route::Profile),
            Command::Select => {
                let email = self.login_email.clone();
                let result = match self.profile.lock() {
                    Ok(mut svc) => svc
                        .login(&email)
                        .map(|p| p.name.clone())
                        .map_err(anyhow::Error::from),
                    Err(_) => Err(anyhow!("profile lock poisoned")),
                };
                match result {
                    Ok(name) => {
                        self.navigate(Route::Hub);
                        self.message = Some(format!("Welcome back, {name}!"));
                    }
                    Err(err) => self.message = Some(err.to_string()),
                }
            }
            _ => {}
        }
    }
}

fn sorter_command(
    game: &mut crate::core::WasteSorter,
    cmd: Command,
    cursor: &mut usize,
) -> Option<String> {
    let bins = WasteBin::ALL;
    let bin = match cmd {
        Command::Left | Command::Up => {
            *cursor = (*cursor + bins.len() - 1) % bins.len();
            return None;
        }
        Command::Right | Command::Down => {
            *cursor = (*cursor + 1) % bins.len();
            return None;
        }
        Command::Digit(n) if (1..=bins.len()).contains(&(n as usize)) => {
            *cursor = n as usize - 1;
            bins[*cursor]
        }
        Command::Select => bins[(*cursor).min(bins.len() - 1)],
        _ => return None,
    };
    let feedback = game.sort(bin)?;
    game.present_next();
    Some(if feedback.correct() {
        format!("Correct! +{}  {}", feedback.outcome.points, feedback.fact())
    } else {
        format!(
            "{} goes in {}.  {}",
            feedback.item.name,
            feedback.item.bin.as_str(),
            feedback.fact()
        )
    })
}

fn cleanup_command(
    game: &mut crate::core::PollutionCleanup,
    cmd: Command,
    aim: &mut (f32, f32),
) -> Option<String> {
    let target = match cmd {
        Command::Left => {
            aim.0 = (aim.0 - AIM_STEP).max(0.0);
            return None;
        }
        Command::Right => {
            aim.0 = (aim.0 + AIM_STEP).min(100.0);
            return None;
        }
        Command::Up => {
            aim.1 = (aim.1 - AIM_STEP).max(0.0);
            return None;
        }
        Command::Down => {
            aim.1 = (aim.1 + AIM_STEP).min(100.0);
            return None;
        }
        Command::Digit(n) if n >= 1 => game.field().get(n as usize - 1).map(|p| p.id),
        Command::Select => game
            .nearest(aim.0, aim.1)
            .filter(|p| (p.x - aim.0).hypot(p.y - aim.1) <= CLEAN_RADIUS)
            .map(|p| p.id),
        _ => return None,
    };
    match target {
        Some(id) => {
            let outcome = game.clean(id)?;
            Some(format!("Cleaned! +{}", outcome.points))
        }
        None => {
            game.miss()?;
            Some("Missed!".to_string())
        }
    }
}

fn memory_command(
    game: &mut crate::core::EcoMemory,
    cmd: Command,
    cursor: &mut usize,
) -> Option<String> {
    use crate::core::FlipResult;

    let cards = game.deck().len().max(1);
    match cmd {
        Command::Left => *cursor = (*cursor + cards - 1) % cards,
        Command::Right => *cursor = (*cursor + 1) % cards,
        Command::Up => *cursor = (*cursor + cards - MEMORY_COLUMNS % cards) % cards,
        Command::Down => *cursor = (*cursor + MEMORY_COLUMNS) % cards,
        Command::Select => {
            return match game.flip(*cursor) {
                FlipResult::Matched(outcome) => Some(format!("Match! +{}", outcome.points)),
                FlipResult::Mismatched(_) => Some("Not a match".to_string()),
                FlipResult::Revealed | FlipResult::Ignored => None,
            }
        }
        _ => {}
    }
    None
}

fn quiz_command(
    game: &mut crate::core::TriviaQuiz,
    cmd: Command,
    cursor: &mut usize,
) -> Option<String> {
    let options = game.current_question().map(|q| q.options.len()).unwrap_or(0);
    if options == 0 {
        return None;
    }
    match cmd {
        Command::Up | Command::Left if !game.is_locked() => {
            *cursor = (*cursor + options - 1) % options;
            None
        }
        Command::Down | Command::Right if !game.is_locked() => {
            *cursor = (*cursor + 1) % options;
            None
        }
        Command::Digit(n) if !game.is_locked() && (1..=options).contains(&(n as usize)) => {
            *cursor = n as usize - 1;
            game.choose(*cursor);
            None
        }
        Command::Select if game.is_locked() => {
            game.advance();
            *cursor = 0;
            Some(String::new())
        }
        Command::Select => {
            let question = game.current_question()?;
            game.choose(*cursor);
            let feedback = game.submit()?;
            Some(if feedback.correct() {
                "Correct!".to_string()
            } else {
                format!("The answer was: {}", question.options[feedback.answer_index])
            })
        }
        _ => None,
    }
}
