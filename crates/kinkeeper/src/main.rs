//! `kinkeep` - CLI for kinkeeper
//!
//! This binary provides the command-line interface for keeping family
//! member records and browsing them as a tree and a gallery.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use kinkeeper::cli::{
    AddCommand, Cli, ClearCommand, Command, ConfigCommand, EditCommand, ExportCommand,
    GalleryCommand, ImportCommand, ListCommand, ProfileCommand, RemoveCommand, SettingsCommand,
    ShowCommand, StatsCommand, TreeCommand, VoiceCommand,
};
use kinkeeper::media::{FsMediaReader, MediaReader};
use kinkeeper::recorder::FileInput;
use kinkeeper::relation::emoji_for;
use kinkeeper::store::SqliteStore;
use kinkeeper::view::GalleryView;
use kinkeeper::{
    init_logging, Error, FormWizard, Keeper, KeeperConfig, Member, MemberDraft, VoiceRecorder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = KeeperConfig::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Add(cmd) => handle_add(&config, cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, cmd).await,
        Command::Remove(cmd) => handle_remove(&config, &cmd),
        Command::Tree(cmd) => handle_tree(&config, &cmd),
        Command::Gallery(cmd) => handle_gallery(&config, &cmd),
        Command::Stats(cmd) => handle_stats(&config, &cmd),
        Command::Voice(cmd) => handle_voice(&config, cmd).await,
        Command::Profile(cmd) => handle_profile(&config, cmd),
        Command::Export(cmd) => handle_export(&config, cmd).await,
        Command::Import(cmd) => handle_import(&config, cmd).await,
        Command::Clear(cmd) => handle_clear(&config, &cmd),
        Command::Settings(cmd) => handle_settings(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the store and load keeper state.
fn open_keeper(config: &KeeperConfig) -> anyhow::Result<Keeper> {
    let store = SqliteStore::open(config.store_path())?;
    Ok(Keeper::load(Box::new(store)))
}

/// Look up a member or fail with the user-facing not-found message.
fn find_member(keeper: &Keeper, key: &str) -> anyhow::Result<Member> {
    keeper
        .find(key)
        .cloned()
        .ok_or_else(|| Error::not_found(key).into())
}

async fn handle_add(config: &KeeperConfig, cmd: AddCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;
    let mut wizard = FormWizard::with_photo_limit(config.media.max_photo_bytes);

    let display_name = cmd.name.trim().to_string();
    wizard.draft_mut().name = cmd.name;
    wizard.draft_mut().relation = cmd.relation;
    wizard.draft_mut().birth_date = cmd.birth_date;
    if let Some(bio) = cmd.bio {
        wizard.draft_mut().bio = bio;
    }

    if let Some(path) = cmd.photo {
        let media = FsMediaReader
            .read(&path)
            .await
            .with_context(|| format!("cannot read photo {}", path.display()))?;
        wizard.attach_photo(media);
    }
    if let Some(path) = cmd.audio {
        let media = FsMediaReader
            .read(&path)
            .await
            .with_context(|| format!("cannot read audio {}", path.display()))?;
        wizard.attach_audio(media);
    }

    wizard.submit(&mut keeper)?;
    println!("{display_name} added to your family tree!");
    Ok(())
}

async fn handle_edit(config: &KeeperConfig, cmd: EditCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;
    let member = find_member(&keeper, &cmd.key)?;

    let mut wizard = FormWizard::with_photo_limit(config.media.max_photo_bytes);
    wizard.begin_edit(&member);

    if let Some(name) = cmd.name {
        wizard.draft_mut().name = name;
    }
    if let Some(relation) = cmd.relation {
        wizard.draft_mut().relation = relation;
    }
    if let Some(birth_date) = cmd.birth_date {
        wizard.draft_mut().birth_date = Some(birth_date);
    }
    if let Some(bio) = cmd.bio {
        wizard.draft_mut().bio = bio;
    }
    if cmd.remove_photo {
        wizard.remove_photo();
    }
    if cmd.remove_audio {
        wizard.remove_audio();
    }
    if let Some(path) = cmd.photo {
        let media = FsMediaReader
            .read(&path)
            .await
            .with_context(|| format!("cannot read photo {}", path.display()))?;
        wizard.attach_photo(media);
    }
    if let Some(path) = cmd.audio {
        let media = FsMediaReader
            .read(&path)
            .await
            .with_context(|| format!("cannot read audio {}", path.display()))?;
        wizard.attach_audio(media);
    }

    let id = wizard.submit(&mut keeper)?;
    let name = keeper
        .find(&id.to_string())
        .map(|m| m.name.clone())
        .unwrap_or_default();
    println!("{name} updated successfully!");
    Ok(())
}

fn handle_list(config: &KeeperConfig, cmd: &ListCommand) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(keeper.members())?);
        return Ok(());
    }

    if keeper.members().is_empty() {
        println!("No family members yet. Add one with `kinkeep add`.");
        return Ok(());
    }

    for member in keeper.members() {
        println!(
            "{:>4}  {} {}  ({}){}{}",
            member.id,
            emoji_for(&member.relation),
            member.name,
            member.relation,
            if member.has_photo() { "  [photo]" } else { "" },
            if member.has_voice() { "  [voice]" } else { "" },
        );
    }
    Ok(())
}

fn handle_show(config: &KeeperConfig, cmd: &ShowCommand) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;
    let member = find_member(&keeper, &cmd.key)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&member)?);
        return Ok(());
    }

    println!("{} {}", emoji_for(&member.relation), member.name);
    println!("Relation:  {}", capitalize_first(&member.relation));
    println!(
        "Born:      {}",
        member
            .birth_date
            .map_or_else(|| "Not specified".to_string(), |d| d.to_string())
    );
    println!(
        "Story:     {}",
        if member.bio.is_empty() {
            "No story available yet."
        } else {
            member.bio.as_str()
        }
    );
    if let Some(photo) = &member.photo {
        println!("Photo:     {photo}");
    }
    if let Some(audio) = &member.audio {
        println!("Voice:     {audio}");
    }
    Ok(())
}

fn handle_remove(config: &KeeperConfig, cmd: &RemoveCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;
    let member = find_member(&keeper, &cmd.key)?;

    if member.is_self() {
        println!("{} is the keeper of this tree and can't be removed.", member.name);
        return Ok(());
    }

    if !cmd.yes {
        println!(
            "This will remove {} from your family tree. This action cannot be undone.",
            member.name
        );
        println!("Use --yes to confirm.");
        return Ok(());
    }

    if keeper.delete_member(member.id) {
        println!("{} has been removed from your family tree.", member.name);
    }
    Ok(())
}

fn handle_tree(config: &KeeperConfig, cmd: &TreeCommand) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;
    let tree = keeper.tree();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    if tree.is_empty() {
        println!("The tree is empty. Add your first member with `kinkeep add`.");
        return Ok(());
    }

    if let Some(center) = &tree.center {
        println!("{} {} (you)", emoji_for(&center.relation), center.name);
        if !center.bio.is_empty() {
            println!("    {}", center.bio);
        }
        println!();
    }

    for group in &tree.groups {
        println!("{}", group.title);
        for member in &group.members {
            println!(
                "    {} {}  ({})",
                emoji_for(&member.relation),
                member.name,
                capitalize_first(&member.relation)
            );
        }
        println!();
    }
    Ok(())
}

fn handle_gallery(config: &KeeperConfig, cmd: &GalleryCommand) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;
    let gallery = keeper.gallery();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&gallery)?);
        return Ok(());
    }

    match gallery {
        GalleryView::Empty { prompt } => println!("{prompt}"),
        GalleryView::Grid { items } => {
            for member in items {
                let marker = if member.has_photo() {
                    "[photo]"
                } else {
                    "[no photo]"
                };
                println!(
                    "{marker}  {} {}  ({})",
                    emoji_for(&member.relation),
                    member.name,
                    member.relation
                );
            }
        }
    }
    Ok(())
}

fn handle_stats(config: &KeeperConfig, cmd: &StatsCommand) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;
    let stats = keeper.stats();
    let footprint = keeper.footprint();

    if cmd.json {
        let out = serde_json::json!({
            "count": stats.count,
            "photoCount": stats.photo_count,
            "voiceCount": stats.voice_count,
            "storageBytes": footprint.bytes,
            "storageBadge": footprint.badge(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Family members: {}", stats.count);
    println!("Photos:         {}", stats.photo_count);
    println!("Voice notes:    {}", stats.voice_count);
    println!(
        "Storage:        {:.2} KB used ({})",
        footprint.kilobytes(),
        footprint.badge()
    );
    Ok(())
}

async fn handle_voice(config: &KeeperConfig, cmd: VoiceCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;
    let member = find_member(&keeper, &cmd.key)?;

    let mut recorder = VoiceRecorder::new(Box::new(FileInput::new(&cmd.from)));
    recorder.start().await?;
    let media = recorder
        .stop()
        .context("recording produced no audio")?;
    anyhow::ensure!(
        media.is_audio(),
        "{} does not look like an audio file",
        cmd.from.display()
    );

    let mut draft = MemberDraft::from_member(&member);
    draft.audio = Some(media);
    keeper.update_member(member.id, draft)?;
    println!("Voice recording attached to {}.", member.name);
    Ok(())
}

fn handle_profile(config: &KeeperConfig, cmd: ProfileCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;

    match cmd.set {
        Some(text) => {
            keeper.set_profile(&text);
            println!("Profile updated.");
        }
        None => match keeper.profile() {
            Some(text) => println!("{text}"),
            None => println!("No profile yet. Set one with `kinkeep profile --set`."),
        },
    }
    Ok(())
}

async fn handle_export(config: &KeeperConfig, cmd: ExportCommand) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;
    let json = keeper.export().to_pretty_json()?;

    match cmd.output {
        Some(path) => {
            tokio::fs::write(&path, &json)
                .await
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Family data exported to {}.", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn handle_import(config: &KeeperConfig, cmd: ImportCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;
    let text = tokio::fs::read_to_string(&cmd.file)
        .await
        .with_context(|| format!("cannot read {}", cmd.file.display()))?;

    let summary = keeper.import_json(&text)?;
    match summary.members_imported {
        Some(count) => println!("Imported {count} family members."),
        None => println!("No member list in the file; members unchanged."),
    }
    if summary.profile_updated {
        println!("Profile updated.");
    }
    Ok(())
}

fn handle_clear(config: &KeeperConfig, cmd: &ClearCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;

    if !cmd.yes {
        println!("This will delete all family members, photos, and voice recordings.");
        println!("This action cannot be undone. Use --yes to confirm.");
        return Ok(());
    }

    keeper.clear_all();
    println!("All family data has been cleared.");
    Ok(())
}

fn handle_settings(config: &KeeperConfig, cmd: &SettingsCommand) -> anyhow::Result<()> {
    let mut keeper = open_keeper(config)?;

    match cmd {
        SettingsCommand::Show { json } => {
            let settings = keeper.settings();
            if *json {
                let out = serde_json::json!({
                    "treeLayout": settings.layout.as_str(),
                    "colorTheme": settings.theme.as_str(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Tree layout: {}", settings.layout);
                println!("Color theme: {}", settings.theme);
            }
        }
        SettingsCommand::Layout { value } => {
            let layout = (*value).into();
            keeper.set_layout(layout);
            println!("Tree layout changed to {layout}.");
        }
        SettingsCommand::Theme { value } => {
            let theme = (*value).into();
            keeper.set_theme(theme);
            println!("Color theme changed to {theme}.");
        }
    }
    Ok(())
}

fn handle_config(config: &KeeperConfig, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Store path:      {}", config.store_path().display());
                println!();
                println!("[Media]");
                println!("  Max photo bytes: {}", config.media.max_photo_bytes);
            }
        }
        ConfigCommand::Path => {
            println!("{}", KeeperConfig::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(KeeperConfig::default_config_path);
            println!("Validating configuration: {}", path.display());
            match KeeperConfig::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Capitalize the first character, the way relation labels display.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
