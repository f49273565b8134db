use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use roster_core::dto::ChoicesDto;
use roster_core::RosterDraft;

pub const DEFAULT_PLAYER_ROWS: usize = 12;
pub const DEFAULT_STAFF_ROWS: usize = 3;

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Number of empty player rows
    #[arg(long, default_value_t = DEFAULT_PLAYER_ROWS)]
    pub players: usize,
    /// Number of empty staff rows
    #[arg(long, default_value_t = DEFAULT_STAFF_ROWS)]
    pub staff: usize,
}

pub fn template(ctx: &Context<'_>, args: TemplateArgs) -> Result<()> {
    let draft = RosterDraft::with_blank_rows(&ctx.config.placeholder, args.players, args.staff);
    if ctx.json {
        return print_json(draft.form());
    }
    let rendered = toml::to_string(draft.form()).with_context(|| "render draft as TOML")?;
    print!("{rendered}");
    Ok(())
}

pub fn choices(ctx: &Context<'_>) -> Result<()> {
    let choices = ChoicesDto::new(&ctx.config.placeholder);
    if ctx.json {
        return print_json(&choices);
    }

    println!("placeholder: {}", choices.placeholder);
    print_list("sexes", &choices.sexes);
    println!("categories:");
    for category in &choices.categories {
        println!("  {:<4} {}", category.code, category.name);
    }
    print_list("positions", &choices.positions);
    print_list("roles", &choices.roles);
    Ok(())
}

fn print_list(label: &str, values: &[&str]) {
    println!("{label}:");
    for value in values {
        println!("  {value}");
    }
}
