// UI layer: paints pages in the terminal and turns menu choices into view
// actions. `Shell` is the router: it mounts one view per route, runs its
// menu until the view asks to navigate, then drops it.

use crate::api::BookApi;
use crate::book::BookId;
use crate::page::{Block, Notice, NoticeLevel, Page, GUIDE_HINTS, GUIDE_TITLE};
use crate::router::Route;
use crate::views::{
    DetailAction, DetailView, FormAction, FormMode, FormView, ListAction, ListView,
};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

pub const APP_NAME: &str = "BookGen";
pub const REPO_URL: &str = "https://github.com/KierFR-clean/KierFR-clean";

/// Everything the app asks the user. The terminal implementation uses
/// `dialoguer`; tests script the answers.
pub trait Prompter {
    /// Yes/no question. Defaults to "no".
    fn confirm(&mut self, title: &str, text: &str) -> io::Result<bool>;

    /// Pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<usize>;

    /// Free text, pre-filled with `initial`. May return an empty string.
    fn input(&mut self, prompt: &str, initial: &str) -> io::Result<String>;
}

/// Keyboard-driven prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn confirm(&mut self, title: &str, text: &str) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(format!("{} {}", title, text))
            .default(false)
            .interact()
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<usize> {
        // `Select` shows a keyboard-navigable list in the terminal.
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
    }

    fn input(&mut self, prompt: &str, initial: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
    }
}

/// Run `f` while a spinner with `message` ticks on stderr.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = f();
    spinner.finish_and_clear();
    out
}

/// Write `page` wrapped in the header/footer chrome.
pub fn render<W: Write>(
    out: &mut W,
    page: &Page,
    notice: Option<&Notice>,
    year: i32,
) -> io::Result<()> {
    writeln!(out, "{}  {}", APP_NAME.bold().green(), REPO_URL.dim())?;
    writeln!(out, "{}", "─".repeat(60).green())?;

    if let Some(notice) = notice {
        let title = match notice.level {
            NoticeLevel::Success => notice.title.clone().green().bold(),
            NoticeLevel::Error => notice.title.clone().red().bold(),
        };
        writeln!(out, "{} {}", title, notice.text)?;
        writeln!(out)?;
    }

    for block in &page.blocks {
        match block {
            Block::Heading(text) => writeln!(out, "{}\n", text.clone().bold())?,
            Block::Spinner => writeln!(out, "{}", "Loading...".dim())?,
            Block::Error(msg) => writeln!(out, "{} {}", "Error:".red().bold(), msg.clone().red())?,
            Block::Guide => {
                writeln!(out, "┌ {}", GUIDE_TITLE.bold())?;
                for hint in GUIDE_HINTS {
                    writeln!(out, "│ {}", hint)?;
                }
                writeln!(out, "└")?;
            }
            Block::BookCard { id, title, genre } => {
                writeln!(out, "┌ {} {}", title.clone().bold(), format!("#{}", id).dim())?;
                writeln!(out, "│ Genre: {}", genre.clone().green())?;
                writeln!(out, "└")?;
            }
            Block::Detail { label, value } => {
                writeln!(out, "{:<18}{}", format!("{}:", label), value)?;
            }
            Block::Input {
                field,
                value,
                error,
            } => {
                let shown = if value.is_empty() { "-" } else { value.as_str() };
                match error {
                    Some(msg) => {
                        let label = format!("{:<16}", field.label());
                        writeln!(out, "{}{}", label.red(), shown.red())?;
                        writeln!(out, "{:<16}{}", "", msg.clone().red())?;
                    }
                    None => writeln!(out, "{:<16}{}", field.label(), shown)?,
                }
            }
            Block::Link { label, to } => {
                writeln!(out, "{} {}", label.clone().underlined(), format!("({})", to).dim())?;
            }
            Block::Submit { label, busy } => {
                if *busy {
                    writeln!(out, "\n{}", "Saving...".dim())?;
                } else {
                    writeln!(out, "\n[ {} ]", label.clone().green())?;
                }
            }
        }
    }

    writeln!(out, "{}", "─".repeat(60).green())?;
    writeln!(out, "© {} {}", year, APP_NAME)?;
    out.flush()
}

/// Navigation loop over the four routes.
pub struct Shell<'a, W: Write> {
    api: &'a dyn BookApi,
    prompter: &'a mut dyn Prompter,
    out: W,
    year: i32,
    clear_screen: bool,
    pending: Option<Notice>,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(api: &'a dyn BookApi, prompter: &'a mut dyn Prompter, out: W, year: i32) -> Self {
        Shell {
            api,
            prompter,
            out,
            year,
            clear_screen: false,
            pending: None,
        }
    }

    /// Clear the terminal before each repaint.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user exits. Each route gets a fresh view.
    pub fn run(&mut self, start: Route) -> Result<()> {
        let mut route = Some(start);
        while let Some(current) = route {
            tracing::info!(route = %current, "navigate");
            route = match current {
                Route::List => self.list_screen()?,
                Route::Add => self.form_screen(FormMode::Create)?,
                Route::Edit(id) => self.form_screen(FormMode::Update(id))?,
                Route::View(id) => self.detail_screen(id)?,
            };
        }
        Ok(())
    }

    fn paint(&mut self, page: &Page) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        // A pending notice waits for the first page that is not just a spinner.
        let notice = if page.has(&Block::Spinner) {
            None
        } else {
            self.pending.take()
        };
        render(&mut self.out, page, notice.as_ref(), self.year)
    }

    fn choose<A: Clone>(&mut self, actions: &[(String, A)]) -> io::Result<A> {
        let labels: Vec<String> = actions.iter().map(|(l, _)| l.clone()).collect();
        loop {
            let idx = self.prompter.select("What next?", &labels)?;
            if let Some((_, action)) = actions.get(idx) {
                return Ok(action.clone());
            }
        }
    }

    fn list_screen(&mut self) -> Result<Option<Route>> {
        let api = self.api;
        let mut view = ListView::new();
        view.begin_load();
        self.paint(&view.page())?;
        view.finish_load(with_spinner("Loading books...", || api.list_books()));

        loop {
            self.paint(&view.page())?;
            match self.choose(&view.actions())? {
                ListAction::Add => return Ok(Some(Route::Add)),
                ListAction::View(id) => return Ok(Some(Route::View(id))),
                ListAction::Edit(id) => return Ok(Some(Route::Edit(id))),
                ListAction::Delete(id) => {
                    self.pending = view.remove(api, &mut *self.prompter, &id)?;
                }
                ListAction::Reload => {
                    view.begin_load();
                    self.paint(&view.page())?;
                    view.finish_load(with_spinner("Loading books...", || api.list_books()));
                }
                ListAction::Quit => return Ok(None),
            }
        }
    }

    fn form_screen(&mut self, mode: FormMode) -> Result<Option<Route>> {
        let api = self.api;
        let mut view = FormView::new(mode.clone(), self.year);
        if let FormMode::Update(id) = &mode {
            self.paint(&view.page())?;
            view.finish_load(with_spinner("Loading book...", || api.get_book(id)));
        }

        loop {
            self.paint(&view.page())?;
            match self.choose(&view.actions())? {
                FormAction::Edit(field) => {
                    let value = self
                        .prompter
                        .input(field.label(), view.draft().get(field))?;
                    view.set_field(field, value);
                }
                FormAction::Submit => {
                    let Some(submission) = view.begin_submit() else {
                        continue;
                    };
                    self.paint(&view.page())?;
                    let result = with_spinner("Saving...", || submission.send(api));
                    if let Some(saved) = view.finish_submit(result) {
                        self.pending = Some(saved.notice);
                        return Ok(Some(saved.next));
                    }
                }
                FormAction::Back => return Ok(Some(Route::List)),
            }
        }
    }

    fn detail_screen(&mut self, id: BookId) -> Result<Option<Route>> {
        let api = self.api;
        let mut view = DetailView::new(id);
        view.begin_load();
        self.paint(&view.page())?;
        let result = with_spinner("Loading book...", || api.get_book(view.id()));
        view.finish_load(result);

        self.paint(&view.page())?;
        Ok(match self.choose(&view.actions())? {
            DetailAction::Back => Some(Route::List),
            DetailAction::Quit => None,
        })
    }
}
