use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    config::load_settings_from, ApplyOutcome, CommentModerationSelection,
    MenuItemOrderingController, MenuItemTree, MenuItemTypeCatalog,
};
use serde::Serialize;
use shared::domain::{CommentId, MenuItem, MenuItemId, ModerationAction};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

mod fixture;

use fixture::{ConsoleRenderer, FixtureCommentService, FixtureSiteData, SiteFixture};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    fixture: PathBuf,
    #[arg(long, default_value = client_core::config::DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    /// Answer confirmation prompts with yes.
    #[arg(long)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Types {
        #[arg(long)]
        select: Option<String>,
    },
    Reorder {
        #[arg(long)]
        item: i64,
        #[arg(long, allow_hyphen_values = true)]
        index: i64,
    },
    Add {
        #[arg(long)]
        anchor: i64,
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = shared::domain::MENU_ITEM_TYPE_PAGE)]
        item_type: String,
    },
    Moderate {
        #[arg(long, value_enum)]
        action: ActionArg,
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionArg {
    Approve,
    Unapprove,
    Spam,
    Delete,
}

impl From<ActionArg> for ModerationAction {
    fn from(value: ActionArg) -> Self {
        match value {
            ActionArg::Approve => ModerationAction::Approve,
            ActionArg::Unapprove => ModerationAction::Unapprove,
            ActionArg::Spam => ModerationAction::Spam,
            ActionArg::Delete => ModerationAction::Delete,
        }
    }
}

fn print_events<E: Serialize>(rx: &mut UnboundedReceiver<E>) -> Result<()> {
    while let Ok(event) = rx.try_recv() {
        println!("event: {}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn print_menu(tree: &MenuItemTree) {
    for (handle, depth) in tree.depth_first() {
        if let (Some(item), Some(position)) = (tree.get(handle), tree.position_of(handle)) {
            println!(
                "{}{position}. {} [{}] id={}",
                "  ".repeat(depth),
                item.name,
                item.type_tag,
                item.id.0
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let settings = load_settings_from(&cli.settings);
    let fixture = SiteFixture::load(&cli.fixture)?;
    let renderer = Arc::new(ConsoleRenderer {
        assume_yes: cli.yes,
    });

    match cli.command {
        Command::Types { select } => {
            let site = fixture.site_id;
            let catalog = MenuItemTypeCatalog::new(Arc::new(FixtureSiteData { fixture }), renderer);
            let mut rx = catalog.attach_observer().await;

            if let Err(err) = catalog.load_types(site).await {
                print_events(&mut rx)?;
                return Err(err.into());
            }
            for ty in catalog.types().await {
                println!("{} ({}, {:?})", ty.display_name, ty.tag, ty.kind);
            }
            if let Some(tag) = select {
                catalog.select_type(&tag).await?;
                catalog.focus_selected_type(settings.scroll_animated).await;
            }
            print_events(&mut rx)?;
        }
        Command::Reorder { item, index } => {
            let tree = MenuItemTree::from_specs(&fixture.menu)?;
            let mut controller = MenuItemOrderingController::new(tree);
            let mut rx = controller.attach_observer();
            let handle = controller
                .tree()
                .find(MenuItemId(item))
                .ok_or_else(|| anyhow!("menu item {item} not found"))?;

            controller.set_editing(true);
            controller.commit_order_change(handle, index);
            print_events(&mut rx)?;
            print_menu(controller.tree());
        }
        Command::Add {
            anchor,
            id,
            name,
            item_type,
        } => {
            let tree = MenuItemTree::from_specs(&fixture.menu)?;
            let mut controller = MenuItemOrderingController::new(tree);
            let mut rx = controller.attach_observer();
            let anchor = controller
                .tree()
                .find(MenuItemId(anchor))
                .ok_or_else(|| anyhow!("menu item {anchor} not found"))?;

            controller.set_editing(true);
            controller.begin_adding_item(anchor);
            let added =
                controller.commit_adding(MenuItem::new(MenuItemId(id), name, item_type))?;
            controller.select_item(Some(added));
            print_events(&mut rx)?;
            print_menu(controller.tree());
        }
        Command::Moderate { action, ids } => {
            let service = FixtureCommentService {
                failing: fixture.failing_comment_ids.clone(),
            };
            let selection =
                CommentModerationSelection::new(Arc::new(service), renderer, &settings);
            let mut rx = selection.attach_observer().await;
            selection.load_comments(fixture.comments).await;
            selection.set_editing(true).await;
            for id in ids {
                selection.toggle(CommentId(id)).await;
            }

            match selection.apply_action(action.into()).await {
                ApplyOutcome::Declined => println!("moderation declined"),
                ApplyOutcome::Applied(report) => {
                    let succeeded: Vec<i64> = report.succeeded.iter().map(|id| id.0).collect();
                    println!("succeeded: {succeeded:?}");
                    for (id, reason) in &report.failed {
                        println!("failed: {} ({reason})", id.0);
                    }
                }
            }
            let still_selected: Vec<i64> =
                selection.selected().await.iter().map(|id| id.0).collect();
            println!("still selected: {still_selected:?}");
            print_events(&mut rx)?;
        }
    }

    Ok(())
}
