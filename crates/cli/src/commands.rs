//! Command handlers.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;

use trove_catalog::{
    Category, CategoryKind, CategoryRegistry, DEFAULT_SOUND, SOUND_OPTIONS, SoundOption, icon_for,
    resolve_in,
};
use trove_core::{ItemId, same_name};
use trove_inventory::{BACKUP_FILE_NAME, InventoryItem, InventoryRepository, ItemQuery, NewItem};
use trove_store::KeyValueStore;

use crate::cli::{AddArgs, CategoryCommand, Command, EditArgs, ListArgs};
use crate::photo;
use crate::render::{self, ItemView};

/// Repository and category registry sharing one store, pinned to one `today`.
#[derive(Debug)]
pub struct App<S> {
    repo: InventoryRepository<S>,
    categories: CategoryRegistry<S>,
    today: NaiveDate,
}

impl<S> App<S>
where
    S: KeyValueStore + Clone,
{
    pub fn open(store: S, today: NaiveDate) -> Result<Self> {
        let categories = CategoryRegistry::new(store.clone());
        let repo = InventoryRepository::open(store).context("could not load inventory")?;
        Ok(Self {
            repo,
            categories,
            today,
        })
    }
}

impl<S> App<S>
where
    S: KeyValueStore,
{
    pub fn items(&self) -> &[InventoryItem] {
        self.repo.items()
    }

    pub fn dispatch<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Add(args) => self.add(args, out),
            Command::List(args) => self.list(args, out),
            Command::Show { id } => self.show(&id, out),
            Command::Edit(args) => self.edit(args, out),
            Command::Remove { id } => self.remove(&id, out),
            Command::Categories => self.list_categories(out),
            Command::Category(CategoryCommand::Add { name }) => self.add_category(&name, out),
            Command::Sounds => list_sounds(out),
            Command::Export { output } => self.export(output.as_deref(), out),
            Command::Import { file } => self.import(&file, out),
        }
    }

    pub fn add<W: Write>(&mut self, args: AddArgs, out: &mut W) -> Result<()> {
        let category = match args.category.as_deref() {
            Some(input) => {
                let categories = self.categories.effective_categories()?;
                lookup_category(&categories, input)?.id.clone()
            }
            None => self.categories.default_category_id()?,
        };

        let mut item = NewItem::new(args.name, args.purchase_date.unwrap_or(self.today));
        item.description = args.description;
        item.target_date = args.target_date;
        item.category = category;
        item.notification_sound = check_sound(&args.sound)?;
        item.photo = args.photo.as_deref().map(photo::data_url).transpose()?;
        item.validate()?;

        let created = self.repo.add(item)?;
        writeln!(out, "Added {} ({})", created.name, created.id)?;
        Ok(())
    }

    pub fn list<W: Write>(&self, args: ListArgs, out: &mut W) -> Result<()> {
        let categories = self.categories.effective_categories()?;
        // Unknown input still filters by raw id so orphaned items can be found
        let category = args.category.as_deref().map(|input| {
            find_category(&categories, input)
                .map(|c| c.id.clone())
                .unwrap_or_else(|| input.trim().to_string())
        });
        let query = ItemQuery {
            search: args.search,
            category,
            sort: args.sort,
        };
        let items = query.apply(self.repo.items());

        if args.json {
            let views: Vec<ItemView<'_>> = items
                .iter()
                .map(|item| ItemView::new(item, &resolve_in(&categories, &item.category), self.today))
                .collect();
            serde_json::to_writer_pretty(&mut *out, &views)?;
            writeln!(out)?;
            return Ok(());
        }

        if items.is_empty() {
            writeln!(out, "No items found.")?;
            return Ok(());
        }
        for item in items {
            let category = resolve_in(&categories, &item.category);
            writeln!(out, "{}", render::item_line(item, &category, self.today))?;
        }
        Ok(())
    }

    pub fn show<W: Write>(&self, id: &ItemId, out: &mut W) -> Result<()> {
        let item = self.find(id)?;
        let category = self.categories.resolve(&item.category)?;
        render::write_details(out, item, &category, self.today)?;
        Ok(())
    }

    pub fn edit<W: Write>(&mut self, args: EditArgs, out: &mut W) -> Result<()> {
        let existing = self.find(&args.id)?.clone();
        let mut fields = existing.to_new_item();

        if let Some(name) = args.name {
            fields.name = name;
        }
        if let Some(description) = args.description {
            fields.description = description;
        }
        if let Some(purchase_date) = args.purchase_date {
            fields.purchase_date = purchase_date;
        }
        if args.clear_target {
            fields.target_date = None;
        } else if let Some(target_date) = args.target_date {
            fields.target_date = Some(target_date);
        }
        if let Some(input) = args.category.as_deref() {
            let categories = self.categories.effective_categories()?;
            fields.category = lookup_category(&categories, input)?.id.clone();
        }
        if let Some(sound) = args.sound.as_deref() {
            fields.notification_sound = check_sound(sound)?;
        }
        if args.clear_photo {
            fields.photo = None;
        } else if let Some(path) = args.photo.as_deref() {
            fields.photo = Some(photo::data_url(path)?);
        }
        fields.validate()?;

        let updated = fields.with_id(existing.id.clone());
        if updated == existing {
            writeln!(out, "No changes.")?;
            return Ok(());
        }
        let name = updated.name.clone();
        self.repo.update(updated)?;
        writeln!(out, "Updated {name} ({})", existing.id)?;
        Ok(())
    }

    pub fn remove<W: Write>(&mut self, id: &ItemId, out: &mut W) -> Result<()> {
        let name = self.find(id)?.name.clone();
        self.repo.delete(id)?;
        writeln!(out, "Removed {name} ({id})")?;
        Ok(())
    }

    pub fn list_categories<W: Write>(&self, out: &mut W) -> Result<()> {
        for category in self.categories.effective_categories()? {
            let marker = match category.kind {
                CategoryKind::Custom => "  (custom)",
                _ => "",
            };
            writeln!(
                out,
                "{:<24} {}{marker}",
                category.name,
                icon_for(&category.id).as_str()
            )?;
        }
        Ok(())
    }

    pub fn add_category<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let category = self.categories.add_custom_category(name)?;
        writeln!(out, "Added category {}", category.name)?;
        Ok(())
    }

    /// `output` of `-` writes the backup to `out`; no output means
    /// `inventory_backup.json` in the working directory.
    pub fn export<W: Write>(&self, output: Option<&Path>, out: &mut W) -> Result<()> {
        let Some(contents) = self.repo.export_backup()? else {
            writeln!(out, "No items to export.")?;
            return Ok(());
        };

        let path = output.unwrap_or(Path::new(BACKUP_FILE_NAME));
        if path == Path::new("-") {
            writeln!(out, "{contents}")?;
            return Ok(());
        }
        std::fs::write(path, &contents)
            .with_context(|| format!("could not write backup to {}", path.display()))?;
        tracing::info!(path = %path.display(), "backup exported");
        writeln!(out, "Exported {} items to {}", self.repo.len(), path.display())?;
        Ok(())
    }

    pub fn import<W: Write>(&mut self, file: &Path, out: &mut W) -> Result<()> {
        let contents = std::fs::read_to_string(file)
            .with_context(|| format!("could not read {}", file.display()))?;
        let count = self
            .repo
            .restore_backup(&contents)
            .with_context(|| format!("could not import {}", file.display()))?;
        writeln!(out, "Imported {count} items from {}", file.display())?;
        let kept = self.repo.unreadable_count();
        if kept > 0 {
            writeln!(out, "{kept} entries could not be read and were kept unchanged")?;
        }
        Ok(())
    }

    fn find(&self, id: &ItemId) -> Result<&InventoryItem> {
        self.repo
            .get_by_id(id)
            .ok_or_else(|| anyhow!("no item with id {id}"))
    }
}

pub fn list_sounds<W: Write>(out: &mut W) -> Result<()> {
    for sound in SOUND_OPTIONS {
        let marker = if sound.id == DEFAULT_SOUND { "  (default)" } else { "" };
        writeln!(out, "{:<16}{}{marker}", sound.id, sound.name)?;
    }
    Ok(())
}

/// Match by exact id first, then by name ignoring case.
fn find_category<'a>(categories: &'a [Category], input: &str) -> Option<&'a Category> {
    let input = input.trim();
    categories
        .iter()
        .find(|c| c.id == input)
        .or_else(|| categories.iter().find(|c| same_name(&c.name, input)))
}

fn lookup_category<'a>(categories: &'a [Category], input: &str) -> Result<&'a Category> {
    find_category(categories, input).ok_or_else(|| {
        anyhow!("unknown category {input:?}; add it first with `trove category add`")
    })
}

fn check_sound(id: &str) -> Result<String> {
    match SoundOption::find(id) {
        Some(sound) => Ok(sound.id.to_string()),
        None => {
            let known: Vec<_> = SOUND_OPTIONS.iter().map(|s| s.id).collect();
            bail!("unknown sound {id:?}; expected one of: {}", known.join(", "))
        }
    }
}
