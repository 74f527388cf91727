//! AppView: maps the arcade [`App`] state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{
    level_progress_percent, EcoMemory, Game, PollutionCleanup, TriviaQuiz, WasteSorter,
    HUB_ENTRIES,
};
use crate::engine::{App, FormField, Screen};
use crate::fb::{str_width, FrameBuffer};
use crate::profile::{ProfileStore, Scope, AVATAR_CHOICES};
use crate::theme;
use crate::types::{CompletionReport, Difficulty, GameKind, WasteBin};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Area between the header and the footer.
#[derive(Debug, Clone, Copy)]
struct Body {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const MEMORY_COLUMNS: usize = 4;
const CARD_W: u16 = 14;
const CARD_H: u16 = 4;
const BAR_W: u16 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppView;

impl AppView {
    pub fn new() -> Self {
        Self
    }

    /// Render the current app state into an existing framebuffer.
    pub fn render_into<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(theme::TEXT.into_cell(' '));
        if viewport.width < 20 || viewport.height < 8 {
            fb.put_str(0, 0, "Terminal too small", theme::BAD);
            return;
        }

        self.draw_header(app, viewport, fb);
        let body = Body {
            x: 2,
            y: 3,
            w: viewport.width.saturating_sub(4),
            h: viewport.height.saturating_sub(6),
        };

        match app.screen() {
            Screen::Hub => self.draw_hub(app, body, fb),
            Screen::DifficultyPicker => self.draw_picker(app.difficulty(), body, fb),
            Screen::Playing => {
                if let Some(game) = app.game() {
                    self.draw_game(app, game, body, fb);
                }
            }
            Screen::Result(report) => self.draw_result(&report, body, fb),
            Screen::Leaderboard => self.draw_leaderboard(app, body, fb),
            Screen::Profile => self.draw_profile(app, body, fb),
            Screen::SignUp => self.draw_sign_up(app, body, fb),
            Screen::Login => self.draw_login(app, body, fb),
        }

        self.draw_footer(app, viewport, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(app, viewport, &mut fb);
        fb
    }

    fn draw_header<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.put_str(1, 0, "🌍 EcoQuest Arcade", theme::TITLE);
        let who = match app.profile() {
            Some(p) => format!(
                "{} {} · Lv {} · {} XP",
                p.avatar.label(),
                p.name,
                p.level,
                p.xp
            ),
            None => "Not signed in (p)".to_string(),
        };
        let x = viewport.width.saturating_sub(str_width(&who) + 1);
        fb.put_str(x, 0, &who, theme::MUTED);
        fb.fill_rect(0, 1, viewport.width, 1, '─', theme::BORDER);
    }

    fn draw_footer<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let y = viewport.height - 1;
        if let Some(message) = app.message() {
            let style = if message.starts_with("Correct")
                || message.starts_with("Match")
                || message.starts_with("Cleaned")
                || message.starts_with("Welcome")
            {
                theme::GOOD
            } else {
                theme::ACCENT
            };
            fb.put_str(1, y - 1, message, style);
        }
        let hints = match app.screen() {
            Screen::Hub => "↑↓ choose · Enter play · 1-4 quick start · l leaderboard · p profile · q quit",
            Screen::DifficultyPicker => "↑↓ choose · Enter start · Esc back",
            Screen::Playing => match app.game().map(Game::kind) {
                Some(GameKind::WasteSorter) => "1-3 or ←→ + Enter sort · r restart · Esc back",
                Some(GameKind::PollutionCleanup) => "arrows aim · Enter clean · 1-9 pick · Esc back",
                Some(GameKind::EcoMemory) => "arrows move · Enter flip · r restart · Esc back",
                _ => "↑↓ or 1-4 choose · Enter submit/next · Esc back",
            },
            Screen::Result(_) => "Enter back to games · r play again",
            Screen::Leaderboard => "←→ group · Tab class/school · / search · Esc back",
            Screen::Profile => "↑↓ choose · Enter select · Esc back",
            Screen::SignUp => "type · Tab/↑↓ field · ←→ avatar · Enter next/submit · Esc cancel",
            Screen::Login => "type your email · Enter log in · Esc cancel",
        };
        fb.put_str(1, y, hints, theme::MUTED);
    }

    fn draw_hub<S: ProfileStore + 'static>(&self, app: &App<S>, body: Body, fb: &mut FrameBuffer) {
        fb.put_str(body.x, body.y, "Choose a game", theme::TITLE);
        for (i, entry) in HUB_ENTRIES.iter().enumerate() {
            let y = body.y + 2 + (i as u16) * 2;
            if y >= body.y + body.h {
                break;
            }
            let selected = i == app.hub_selected();
            let style = if selected { theme::SELECTED } else { theme::TEXT };
            let line = format!(" {}. {:<20} +{} XP ", i + 1, entry.game.title(), entry.xp_label);
            let end = fb.put_str(body.x, y, &line, style);
            fb.put_str(end + 1, y, entry.description, theme::MUTED);
        }
    }

    fn draw_picker(&self, current: Difficulty, body: Body, fb: &mut FrameBuffer) {
        fb.put_str(body.x, body.y, "Eco Trivia · pick a difficulty", theme::TITLE);
        for (i, d) in Difficulty::ALL.iter().enumerate() {
            let y = body.y + 2 + i as u16;
            let style = if *d == current { theme::SELECTED } else { theme::TEXT };
            let line = format!(
                " {}. {:<10} +{} XP for a perfect round ",
                i + 1,
                d.as_str(),
                d.flawless_xp()
            );
            fb.put_str(body.x, y, &line, style);
        }
    }

    fn draw_game<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        game: &Game,
        body: Body,
        fb: &mut FrameBuffer,
    ) {
        let snap = game.snapshot();
        fb.put_str(body.x, body.y, game.kind().title(), theme::TITLE);

        let mut status = format!(
            "Score {}   Progress {}/{}   Streak {}",
            snap.score, snap.progress, snap.target, snap.streak
        );
        if let Some(t) = snap.time_remaining {
            status.push_str(&format!("   Time {t}s"));
        }
        fb.put_str(body.x, body.y + 1, &status, theme::ACCENT);

        let area = Body {
            x: body.x,
            y: body.y + 3,
            w: body.w,
            h: body.h.saturating_sub(3),
        };
        match game {
            Game::Sorter(g) => self.draw_sorter(g, app.cursor(), area, fb),
            Game::Cleanup(g) => self.draw_cleanup(g, app.aim(), area, fb),
            Game::Memory(g) => self.draw_memory(g, app.cursor(), area, fb),
            Game::Quiz(g) => self.draw_quiz(g, app.cursor(), area, fb),
        }
    }

    fn draw_sorter(&self, game: &WasteSorter, cursor: usize, area: Body, fb: &mut FrameBuffer) {
        if let Some(item) = game.current() {
            fb.put_str(area.x, area.y, "Where does this go?", theme::MUTED);
            let label = format!("{}  {}", item.glyph, item.name);
            fb.put_str(area.x + 2, area.y + 2, &label, theme::TEXT.bold());
        }

        let y = area.y + 5;
        let mut x = area.x;
        for (i, bin) in WasteBin::ALL.iter().enumerate() {
            let style = if i == cursor { theme::SELECTED } else { theme::FIELD };
            let label = format!(" {} {} {} ", i + 1, bin_glyph(*bin), bin.as_str());
            let end = fb.put_str(x, y, &label, style);
            fb.put_str(x, y + 1, bin.hint(), theme::MUTED);
            x = end.max(x + str_width(bin.hint())) + 3;
        }
    }

    fn draw_cleanup(
        &self,
        game: &PollutionCleanup,
        aim: (f32, f32),
        area: Body,
        fb: &mut FrameBuffer,
    ) {
        let w = area.w.min(72);
        let h = area.h.min(18);
        if w < 10 || h < 5 {
            return;
        }
        fb.fill_rect(area.x + 1, area.y + 1, w - 2, h - 2, ' ', theme::FIELD);
        fb.draw_border(area.x, area.y, w, h, theme::BORDER);

        let inner_w = (w - 4) as f32;
        let inner_h = (h - 3) as f32;
        let to_cell = |px: f32, py: f32| {
            let cx = area.x + 1 + ((px / 100.0) * inner_w) as u16;
            let cy = area.y + 1 + ((py / 100.0) * inner_h) as u16;
            (cx, cy)
        };

        for (i, p) in game.field().iter().enumerate() {
            let (cx, cy) = to_cell(p.x, p.y);
            let label = if i < 9 {
                format!("{}{}", i + 1, p.glyph)
            } else {
                p.glyph.to_string()
            };
            fb.put_str(cx, cy, &label, theme::FIELD);
        }

        let (ax, ay) = to_cell(aim.0, aim.1);
        fb.put_char(ax, ay, '+', theme::ACCENT.bold());
    }

    fn draw_memory(&self, game: &EcoMemory, cursor: usize, area: Body, fb: &mut FrameBuffer) {
        fb.put_str(area.x, area.y, &format!("Moves {}", game.moves()), theme::MUTED);
        for (i, card) in game.deck().iter().enumerate() {
            let col = (i % MEMORY_COLUMNS) as u16;
            let row = (i / MEMORY_COLUMNS) as u16;
            let x = area.x + col * (CARD_W + 1);
            let y = area.y + 1 + row * CARD_H;
            if y + CARD_H > area.y + area.h + 1 {
                break;
            }

            let border = if i == cursor { theme::ACCENT } else { theme::BORDER };
            fb.draw_border(x, y, CARD_W, CARD_H - 1, border);
            let (text, style) = if card.solved {
                (format!("{} {}", card.card.glyph, card.card.name), theme::GOOD)
            } else if game.is_face_up(i) {
                (format!("{} {}", card.card.glyph, card.card.name), theme::TEXT)
            } else {
                ("?".to_string(), theme::MUTED)
            };
            fb.put_str_centered(x + 1, y + 1, CARD_W - 2, &truncate(&text, CARD_W - 2), style);
        }
    }

    fn draw_quiz(&self, game: &TriviaQuiz, cursor: usize, area: Body, fb: &mut FrameBuffer) {
        let Some(question) = game.current_question() else {
            return;
        };
        let header = format!(
            "Question {}/{} · {}% complete",
            game.current_index() + 1,
            game.total(),
            game.percent_complete()
        );
        fb.put_str(area.x, area.y, &header, theme::MUTED);
        fb.put_str(area.x, area.y + 2, question.prompt, theme::TEXT.bold());

        for (i, option) in question.options.iter().enumerate() {
            let y = area.y + 4 + i as u16;
            let style = if game.is_locked() {
                if i == question.answer {
                    theme::GOOD
                } else if Some(i) == game.selected() {
                    theme::BAD
                } else {
                    theme::MUTED
                }
            } else if i == cursor {
                theme::SELECTED
            } else {
                theme::TEXT
            };
            fb.put_str(area.x + 2, y, &format!(" {}. {} ", i + 1, option), style);
        }
        if game.is_locked() {
            let y = area.y + 5 + question.options.len() as u16;
            fb.put_str(area.x, y, "Press Enter for the next question", theme::ACCENT);
        }
    }

    fn draw_result(&self, report: &CompletionReport, body: Body, fb: &mut FrameBuffer) {
        let w = body.w.min(44);
        let x = body.x + (body.w - w) / 2;
        fb.draw_border(x, body.y, w, 9, theme::BORDER);
        fb.put_str_centered(x, body.y + 1, w, "Round complete!", theme::TITLE);
        fb.put_str_centered(x, body.y + 2, w, report.game.title(), theme::MUTED);
        let lines = [
            format!("Final score   {}", report.final_score),
            format!("Items         {}", report.items_processed),
            format!("XP earned     +{}", report.reward_xp),
        ];
        for (i, line) in lines.iter().enumerate() {
            fb.put_str(x + 4, body.y + 4 + i as u16, line, theme::TEXT);
        }
    }

    fn draw_leaderboard<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        body: Body,
        fb: &mut FrameBuffer,
    ) {
        let view = app.leaderboard_view();
        fb.put_str(body.x, body.y, "Leaderboard", theme::TITLE);

        let mut x = body.x + 14;
        for scope in [Scope::Class, Scope::School] {
            let style = if scope == view.scope { theme::SELECTED } else { theme::FIELD };
            x = fb.put_str(x, body.y, &format!(" {} ", scope.as_str()), style) + 1;
        }
        let group = app.leaderboard_group().unwrap_or("-");
        x = fb.put_str(x + 1, body.y, &format!("< {group} >"), theme::ACCENT);

        let search_style = if view.searching { theme::SELECTED } else { theme::MUTED };
        let search = if view.query.is_empty() && !view.searching {
            "/ search".to_string()
        } else {
            format!("search: {}", view.query)
        };
        fb.put_str(x + 2, body.y, &search, search_style);

        let rows = app.leaderboard_rows();
        if rows.is_empty() {
            fb.put_str(body.x, body.y + 2, "No students match.", theme::MUTED);
            return;
        }
        for (i, row) in rows.iter().enumerate() {
            let y = body.y + 2 + i as u16;
            if y >= body.y + body.h {
                break;
            }
            let style = if row.is_player { theme::ME } else { theme::TEXT };
            let medal = match row.rank {
                1 => "🥇".to_string(),
                2 => "🥈".to_string(),
                3 => "🥉".to_string(),
                n => format!("#{n}"),
            };
            let you = if row.is_player { " (you)" } else { "" };
            let line = format!(
                "{:<4} {:<16} {:<24} {:>6} XP ",
                medal,
                format!("{}{}", row.student.name, you),
                format!("{} · {}", row.student.class_name, row.student.school),
                row.student.xp,
            );
            let end = fb.put_str(body.x, y, &line, style);
            draw_bar(fb, end + 1, y, level_progress_percent(row.student.xp));
        }
    }

    fn draw_profile<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        body: Body,
        fb: &mut FrameBuffer,
    ) {
        fb.put_str(body.x, body.y, "Profile", theme::TITLE);
        let mut y = body.y + 2;
        match app.profile() {
            Some(p) => {
                let who = format!("{}  {}", p.avatar.label(), p.name);
                fb.put_str(body.x, y, &who, theme::TEXT.bold());
                let contact = match p.age {
                    Some(age) => format!("{} · age {age}", p.email),
                    None => p.email.clone(),
                };
                fb.put_str(body.x, y + 1, &contact, theme::MUTED);
                let level = format!("Level {} · {} XP ", p.level, p.xp);
                let end = fb.put_str(body.x, y + 3, &level, theme::ACCENT);
                draw_bar(fb, end + 1, y + 3, level_progress_percent(p.xp));
                let badges = if p.badges.is_empty() {
                    "none yet".to_string()
                } else {
                    p.badges.join(", ")
                };
                fb.put_str(body.x, y + 4, &format!("Badges: {badges}"), theme::TEXT);
                y += 6;
            }
            None => {
                fb.put_str(body.x, y, "You are not signed in.", theme::MUTED);
                y += 2;
            }
        }
        for (i, item) in app.profile_menu().iter().enumerate() {
            let style = if i == app.menu_selected() { theme::SELECTED } else { theme::TEXT };
            fb.put_str(body.x, y + i as u16, &format!(" {item} "), style);
        }
    }

    fn draw_sign_up<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        body: Body,
        fb: &mut FrameBuffer,
    ) {
        let form = app.form();
        fb.put_str(body.x, body.y, "Create your EcoQuest account", theme::TITLE);
        for (i, field) in FormField::ALL.iter().enumerate() {
            let y = body.y + 2 + (i as u16) * 2;
            let focused = form.focused() == *field;
            let label_style = if focused { theme::ACCENT } else { theme::MUTED };
            fb.put_str(body.x, y, &format!("{:<10}", field.label()), label_style);
            if *field == FormField::Avatar {
                let mut x = body.x + 11;
                for (j, avatar) in AVATAR_CHOICES.iter().enumerate() {
                    let style = if form.avatar == Some(j) { theme::SELECTED } else { theme::FIELD };
                    x = fb.put_str(x, y, &format!(" {avatar} "), style) + 1;
                }
            } else {
                let value = form.value(*field);
                let style = if focused { theme::SELECTED } else { theme::FIELD };
                fb.fill_rect(body.x + 11, y, 30, 1, ' ', style);
                fb.put_str(body.x + 11, y, &value, style);
            }
        }
    }

    fn draw_login<S: ProfileStore + 'static>(
        &self,
        app: &App<S>,
        body: Body,
        fb: &mut FrameBuffer,
    ) {
        fb.put_str(body.x, body.y, "Log in", theme::TITLE);
        fb.put_str(body.x, body.y + 2, "Email", theme::ACCENT);
        fb.fill_rect(body.x + 11, body.y + 2, 30, 1, ' ', theme::SELECTED);
        fb.put_str(body.x + 11, body.y + 2, app.login_email(), theme::SELECTED);
    }
}

fn bin_glyph(bin: WasteBin) -> &'static str {
    match bin {
        WasteBin::Compost => "🌱",
        WasteBin::Recycle => "♻",
        WasteBin::Trash => "🗑",
    }
}

fn draw_bar(fb: &mut FrameBuffer, x: u16, y: u16, percent: u32) {
    let filled = ((percent.min(100) as u16) * BAR_W + 50) / 100;
    fb.fill_rect(x, y, filled, 1, '█', theme::GOOD);
    fb.fill_rect(x + filled, y, BAR_W - filled, 1, '░', theme::MUTED);
}

fn truncate(s: &str, max: u16) -> String {
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = crate::fb::char_width(ch);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Route;
    use crate::profile::{MemoryStore, ProfileService};
    use crate::types::Command;

    fn app() -> App<MemoryStore> {
        let mut svc = ProfileService::load(MemoryStore::new());
        svc.login("kid@school.org").unwrap();
        App::new(svc, 77)
    }

    fn view(app: &App<MemoryStore>) -> FrameBuffer {
        AppView::new().render(app, Viewport::new(100, 30))
    }

    #[test]
    fn hub_lists_every_game() {
        let fb = view(&app());
        for entry in HUB_ENTRIES.iter() {
            assert!(fb.contains_text(entry.game.title()), "missing {}", entry.game.title());
        }
        assert!(fb.contains_text("Student"));
    }

    #[test]
    fn sorter_shows_current_item_and_score() {
        let mut app = app();
        app.navigate(Route::Game(GameKind::WasteSorter));
        let name = match app.game().unwrap() {
            Game::Sorter(g) => g.current().unwrap().name,
            _ => unreachable!(),
        };
        let fb = view(&app);
        assert!(fb.contains_text(name));
        assert!(fb.contains_text("Score 0"));
        assert!(fb.contains_text("compost"));
    }

    #[test]
    fn cleanup_shows_timer() {
        let mut app = app();
        app.navigate(Route::Game(GameKind::PollutionCleanup));
        assert!(view(&app).contains_text("Time 30s"));
    }

    #[test]
    fn memory_cards_start_hidden() {
        let mut app = app();
        app.navigate(Route::Game(GameKind::EcoMemory));
        let fb = view(&app);
        assert!(fb.contains_text("Moves 0"));
        assert!(fb.contains_text("?"));
    }

    #[test]
    fn quiz_shows_question() {
        let mut app = app();
        app.navigate(Route::Game(GameKind::TriviaQuiz));
        assert!(view(&app).contains_text("pick a difficulty"));
        app.handle(Command::Select);
        let prompt = match app.game().unwrap() {
            Game::Quiz(q) => q.current_question().unwrap().prompt,
            _ => unreachable!(),
        };
        let fb = view(&app);
        let first_word = prompt.split_whitespace().next().unwrap();
        assert!(fb.contains_text(first_word));
        assert!(fb.contains_text("Question 1/10"));
    }

    #[test]
    fn leaderboard_marks_player() {
        let mut app = app();
        app.handle(Command::Leaderboard);
        let fb = view(&app);
        assert!(fb.contains_text("Leaderboard"));
        assert!(fb.contains_text("Student (you)"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = app();
        let fb = AppView::new().render(&app, Viewport::new(10, 4));
        assert!(fb.contains_text("Terminal"));
    }
}
