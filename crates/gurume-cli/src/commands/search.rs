//! `gurume search`: drives a [`SearchSession`] against the server.

use anyhow::anyhow;
use clap::Args;
use gurume_core::codes::AmenityFlag;
use gurume_core::{
    find_scene, Control, SearchCriteria, SearchForm, SearchSession, DEFAULT_PAGE_SIZE,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::client::ApiClient;

use super::{or_empty, truncate};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Area keyword (e.g. 那覇)
    #[arg(long)]
    pub area: Option<String>,
    /// Genre code (e.g. G001); see `gurume options`
    #[arg(long)]
    pub genre: Option<String>,
    /// Budget code (e.g. B008)
    #[arg(long)]
    pub budget: Option<String>,
    /// Party size
    #[arg(long)]
    pub party_size: Option<String>,
    /// Amenity flag by label or id; repeatable (e.g. --amenity 個室 --amenity parking)
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub count: i64,
    /// 1-based page to open
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Scene preset id (e.g. settai); overrides the other filters
    #[arg(long)]
    pub scene: Option<String>,
    /// Prompt for n / p / a <amenity> / r / q after the first page
    #[arg(long, short)]
    pub interactive: bool,
}

impl SearchArgs {
    fn to_form(&self) -> anyhow::Result<SearchForm> {
        let amenities = self
            .amenities
            .iter()
            .map(|raw| {
                AmenityFlag::parse(raw)
                    .map(|flag| flag.label().to_string())
                    .ok_or_else(|| anyhow!("unknown amenity '{raw}'; see `gurume options`"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(SearchForm {
            area: self.area.clone().unwrap_or_default(),
            genre: self.genre.clone().unwrap_or_default(),
            budget: self.budget.clone().unwrap_or_default(),
            party_size: self.party_size.clone().unwrap_or_default(),
            amenities,
            count: self.count.to_string(),
            page: 1,
            special_category: None,
        })
    }
}

/// Opens the first requested page and, in interactive mode, reads paging
/// commands from stdin until `q` or end of input.
///
/// # Errors
///
/// Returns an error for unknown scenes or amenities, or on stdin failure.
/// Request failures are shown in the output, not returned.
pub(crate) async fn run_search(client: &ApiClient, args: SearchArgs) -> anyhow::Result<()> {
    let mut session = SearchSession::new(args.to_form()?);

    let (control, mut criteria) = match args.scene.as_deref() {
        Some(id) => {
            let preset =
                find_scene(id).ok_or_else(|| anyhow!("unknown scene '{id}'; see `gurume options`"))?;
            (Control::Scene(preset.id), session.apply_scene(preset)?)
        }
        None => (Control::Submit, session.submit()?),
    };
    if args.page > 1 {
        session.form_mut().page = args.page;
        criteria = session.form().to_criteria();
    }
    execute(client, &mut session, control, &criteria).await;
    print_session(&session);

    if !args.interactive {
        return Ok(());
    }

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout
            .write_all("[n]ext [p]rev [a <amenity>] [r]eset [q]uit> ".as_bytes())
            .await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let step = match PromptCommand::parse(&line) {
            PromptCommand::Next => session.next_page().map(|c| c.map(|c| (Control::Next, c))),
            PromptCommand::Previous => session
                .previous_page()
                .map(|c| c.map(|c| (Control::Previous, c))),
            PromptCommand::Toggle(flag) => {
                session.form_mut().toggle_amenity(flag.label());
                session.submit().map(|c| Some((Control::Submit, c)))
            }
            PromptCommand::Reset => {
                session.reset();
                println!("form cleared; use a <amenity> to search again");
                continue;
            }
            PromptCommand::Quit => break,
            PromptCommand::Empty => continue,
            PromptCommand::Unknown(other) => {
                println!("unknown command '{other}'");
                continue;
            }
        };

        match step {
            Ok(Some((control, criteria))) => {
                execute(client, &mut session, control, &criteria).await;
                print_session(&session);
            }
            Ok(None) => println!("no page in that direction"),
            Err(busy) => tracing::warn!(%busy, "ignored while loading"),
        }
    }

    Ok(())
}

/// One line typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum PromptCommand {
    Next,
    Previous,
    /// Toggle an amenity filter and search again from page 1.
    Toggle(AmenityFlag),
    Reset,
    Quit,
    Empty,
    Unknown(String),
}

impl PromptCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => return Self::Empty,
            "n" => return Self::Next,
            "p" => return Self::Previous,
            "r" => return Self::Reset,
            "q" => return Self::Quit,
            _ => {}
        }
        line.strip_prefix("a ")
            .and_then(|flag| AmenityFlag::parse(flag.trim()))
            .map_or_else(|| Self::Unknown(line.to_string()), Self::Toggle)
    }
}

async fn execute(
    client: &ApiClient,
    session: &mut SearchSession,
    control: Control,
    criteria: &SearchCriteria,
) {
    let outcome = client.search(criteria).await.map_err(|e| e.to_string());
    session.complete(control, outcome);
}

fn print_session(session: &SearchSession) {
    if let Some(error) = session.error() {
        eprintln!("search failed: {error}");
        return;
    }
    let Some(result) = session.result() else {
        return;
    };

    if let Some(scene) = session.active_scene() {
        println!("scene: {scene}");
    }
    println!(
        "{} shops on this page, {} available",
        result.total_returned, result.total_available
    );

    if result.shops.is_empty() {
        println!("no shops matched");
        return;
    }

    println!("{:<5}{:<13}{:<32}{:<22}BUDGET", "#", "ID", "NAME", "GENRE");
    let first = session.form().start_offset();
    for (offset, shop) in (0_i64..).zip(&result.shops) {
        println!(
            "{:<5}{:<13}{:<32}{:<22}{}",
            first.saturating_add(offset),
            shop.id,
            truncate(&shop.name, 28),
            truncate(or_empty(shop.genre_name()), 18),
            or_empty(shop.budget_name()),
        );
    }

    if let Some(pager) = session.pager().filter(|p| p.visible) {
        println!(
            "page {}/{}{}{}",
            pager.page,
            pager.last_page,
            if pager.has_previous { "  [p]rev" } else { "" },
            if pager.has_next { "  [n]ext" } else { "" },
        );
    }
}
