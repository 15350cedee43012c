//! Person commands

use clap::{Args, Subcommand};

use super::parse_key_value;
use crate::output::{print_person, summary_line, to_json, OutputFormat, PersonView};
use crate::AppContext;
use kith_core::Person;

#[derive(Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommands,
}

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a person (or update them if they already exist)
    Add {
        /// Name: "First Last", "First M. Last", "Last, First" or "Last, First M."
        name: String,
        /// Short biography
        #[arg(long)]
        bio: Option<String>,
        /// Email address
        #[arg(long)]
        email: Vec<String>,
        /// Personal link
        #[arg(long)]
        link: Vec<String>,
        /// Custom attribute
        #[arg(long = "attr", value_name = "LABEL=VALUE", value_parser = parse_key_value)]
        attr: Vec<(String, String)>,
    },
    /// List people
    List,
    /// Show a person's details
    Show {
        /// Person name
        name: String,
    },
    /// Remove a person and every relationship that names them
    Remove {
        /// Person name
        name: String,
        /// Force deletion without confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Update an existing person
    Update {
        /// Person name
        name: String,
        /// Set biography
        #[arg(long, conflicts_with = "clear_bio")]
        bio: Option<String>,
        /// Remove biography
        #[arg(long)]
        clear_bio: bool,
        /// Add emails
        #[arg(long = "add-email")]
        add_email: Vec<String>,
        /// Remove emails
        #[arg(long = "remove-email")]
        remove_email: Vec<String>,
        /// Add links
        #[arg(long = "add-link")]
        add_link: Vec<String>,
        /// Remove links
        #[arg(long = "remove-link")]
        remove_link: Vec<String>,
        /// Set custom attributes
        #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
        /// Remove custom attributes
        #[arg(long = "unset", value_name = "LABEL")]
        unset: Vec<String>,
    },
}

fn lookup<'a>(ctx: &'a AppContext, name: &str) -> anyhow::Result<&'a Person> {
    ctx.registry
        .find(name)
        .ok_or_else(|| anyhow::anyhow!("Person '{}' not found", name))
}

pub fn run(args: &PersonArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    tracing::debug!("Running person command");

    match &args.command {
        PersonCommands::Add {
            name,
            bio,
            email,
            link,
            attr,
        } => {
            let existed = ctx.registry.find(name).is_some();
            let person = ctx.registry.create_or_get(name)?;
            if let Some(bio) = bio {
                person.set_bio(bio.as_str())?;
            }
            for e in email {
                person.add_email(e.as_str())?;
            }
            for l in link {
                person.add_link(l.as_str())?;
            }
            let full_name = person.full_name().to_string();
            for (label, value) in attr {
                ctx.registry.set_custom_attribute(&full_name, label, value)?;
            }

            ctx.save()?;
            tracing::info!("Saved person: {}", full_name);
            if existed {
                println!("Updated existing person: {}", full_name);
            } else {
                println!("Created person: {}", full_name);
            }
        }
        PersonCommands::List => {
            let people: Vec<&Person> = ctx.registry.people().collect();
            tracing::info!("Found {} people", people.len());

            match ctx.format {
                OutputFormat::Json => {
                    let views: Vec<PersonView> = people.into_iter().map(PersonView::from).collect();
                    println!("{}", to_json(&views));
                }
                OutputFormat::Table if people.is_empty() => {
                    println!("No people yet. Add one with 'kith person add <name>'");
                }
                OutputFormat::Table => {
                    println!("People ({} found):", people.len());
                    for person in people {
                        println!("{}", summary_line(person));
                    }
                }
            }
        }
        PersonCommands::Show { name } => {
            let person = lookup(ctx, name)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", to_json(&PersonView::from(person))),
                OutputFormat::Table => print_person(person),
            }
        }
        PersonCommands::Remove { name, force } => {
            let full_name = lookup(ctx, name)?.full_name().to_string();

            if !force {
                println!("Use --force to confirm removal of '{}'", full_name);
                return Ok(());
            }

            ctx.registry.remove_person(&full_name);
            ctx.save()?;
            tracing::info!("Removed person: {}", full_name);
            println!("Removed person: {}", full_name);
        }
        PersonCommands::Update {
            name,
            bio,
            clear_bio,
            add_email,
            remove_email,
            add_link,
            remove_link,
            set,
            unset,
        } => {
            let full_name = lookup(ctx, name)?.full_name().to_string();
            let mut changes = Vec::new();

            // Custom attributes first: a rejected label aborts before any other edit
            for (label, value) in set {
                ctx.registry.set_custom_attribute(&full_name, label, value)?;
                changes.push(format!("set {}: {}", label, value));
            }
            for label in unset {
                if ctx.registry.remove_custom_attribute(&full_name, label).is_some() {
                    changes.push(format!("removed {}", label));
                } else {
                    println!("Attribute '{}' not found on {}", label, full_name);
                }
            }

            let person = ctx
                .registry
                .person_mut(&full_name)
                .ok_or_else(|| anyhow::anyhow!("Person '{}' not found", full_name))?;

            if let Some(bio) = bio {
                person.set_bio(bio.as_str())?;
                changes.push("set bio".to_string());
            }
            if *clear_bio && person.clear_bio().is_some() {
                changes.push("cleared bio".to_string());
            }
            for email in add_email {
                person.add_email(email.as_str())?;
                changes.push(format!("added email: {}", email));
            }
            for email in remove_email {
                if person.remove_email(email) {
                    changes.push(format!("removed email: {}", email));
                } else {
                    println!("Email '{}' not found on {}", email, full_name);
                }
            }
            for link in add_link {
                person.add_link(link.as_str())?;
                changes.push(format!("added link: {}", link));
            }
            for link in remove_link {
                if person.remove_link(link) {
                    changes.push(format!("removed link: {}", link));
                } else {
                    println!("Link '{}' not found on {}", link, full_name);
                }
            }

            if changes.is_empty() {
                println!("No changes specified");
                return Ok(());
            }

            ctx.save()?;
            tracing::info!("Updated person '{}': {:?}", full_name, changes);

            println!("Updated person '{}':", full_name);
            for change in &changes {
                println!("  - {}", change);
            }
        }
    }

    Ok(())
}
