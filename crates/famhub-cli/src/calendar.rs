use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use color_eyre::Result;
use famhub_core::model::split_csv;
use famhub_entity::events::{EventDraft, EventRepo};

use crate::{cli::EventCommand, config, storage};

pub async fn handle(cmd: EventCommand, config: &config::Config) -> Result<()> {
    let repo = EventRepo::new(storage::store_from_config(config)?);

    match cmd {
        EventCommand::Add {
            title,
            date,
            end,
            attendees,
            description,
            color,
        } => {
            let end_date = end.as_deref().map(parse_when).transpose()?;
            let event = repo
                .add(EventDraft {
                    title,
                    description,
                    date: parse_when(&date)?,
                    end_date,
                    attendees: split_csv(&attendees),
                    color,
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Event created: {} at {}.", event.title, event.date);
        }
        EventCommand::List => {
            let partition = repo.partition(Utc::now()).await;
            if partition.upcoming.is_empty() && partition.past.is_empty() {
                println!("No events yet.");
                return Ok(());
            }

            println!("Upcoming:");
            if partition.upcoming.is_empty() {
                println!("  (none)");
            }
            for event in &partition.upcoming {
                println!("  {} {} - {}", event.id, event.date, event.title);
                if !event.attendees.is_empty() {
                    println!("      with {}", event.attendees.join(", "));
                }
            }

            if !partition.past.is_empty() {
                println!("Recently past:");
                for event in &partition.past {
                    println!("  {} {} - {}", event.id, event.date, event.title);
                }
            }
        }
    }

    Ok(())
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM`, or a bare date (midnight).
fn parse_when(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = input.parse::<NaiveDate>() {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(color_eyre::eyre::eyre!("unrecognized date/time: {input}"))
}
