use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate, NaiveTime};
use tracing::{info, Level};

use booking_tracker_backend::domain::{
    BookingError, BookingService, CalendarService, ExportService, GuestbookService, RsvpRequest,
    RsvpService, SelectionService,
};
use booking_tracker_backend::io::{
    read_booking_request, ConsoleNotifier, ConsolePrompt, MapFormReader, NotificationPresenter,
};
use booking_tracker_backend::storage::json::{
    BookingRepository, GuestbookRepository, JsonConnection, RsvpRepository,
};
use shared::{CalendarWeek, ScheduleConfig, SelectedSlot, SlotStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting booking tracker");

    let connection = JsonConnection::new_default()?;
    let config = ScheduleConfig::default();

    let calendar = CalendarService::new(config.clone());
    let selection = SelectionService::new();
    let bookings = BookingService::new(BookingRepository::new(connection.clone()));
    let guestbook = GuestbookService::new(GuestbookRepository::new(connection.clone()));
    let rsvps = RsvpService::new(RsvpRepository::new(connection.clone()));
    let export = ExportService::new(config);

    let notifier = ConsoleNotifier;
    let prompt = ConsolePrompt;

    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "" => {}
            "help" => print_help(),
            "week" => {
                let week = current_week(&calendar, &bookings, &selection).await?;
                render_week(&week);
            }
            "next" => {
                calendar.next_week();
                render_week(&current_week(&calendar, &bookings, &selection).await?);
            }
            "prev" => {
                calendar.previous_week();
                render_week(&current_week(&calendar, &bookings, &selection).await?);
            }
            "select" => {
                let date = parts.next().and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
                let time = parts.next().and_then(|s| NaiveTime::parse_from_str(s, "%H:%M").ok());
                match (date, time) {
                    (Some(date), Some(time)) => {
                        let week = current_week(&calendar, &bookings, &selection).await?;
                        if selection.select(&week, SelectedSlot { date, time }) {
                            println!("Selected {} at {}", date, time.format("%H:%M"));
                        } else {
                            println!("That slot is not available.");
                        }
                    }
                    _ => println!("Usage: select YYYY-MM-DD HH:MM"),
                }
            }
            "book" => {
                let form = collect_booking_form(&stdin)?;
                let request = read_booking_request(&form);
                match bookings.submit_booking(&selection, &request).await {
                    Ok(booking) => {
                        notifier.notify("Booking confirmed!", &bookings.confirmation_message(&booking));
                    }
                    Err(e @ BookingError::Validation(_)) => notifier.notify("Error", &e.to_string()),
                    Err(BookingError::Storage(e)) => return Err(e),
                }
            }
            "bookings" => {
                let all = bookings.list_bookings().await?;
                if all.is_empty() {
                    println!("No bookings yet.");
                }
                for (index, booking) in all.iter().enumerate() {
                    println!(
                        "[{}] {} {} - {} ({}) for {}",
                        index,
                        booking.date,
                        booking.time.format("%H:%M"),
                        booking.service.display_name(),
                        booking.modality.display_name(),
                        booking.name,
                    );
                }
            }
            "cancel" => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(index) => match bookings.cancel_booking(index, &prompt).await? {
                    Some(_) => notifier.notify(
                        "Booking cancelled",
                        "Your booking has been cancelled successfully.",
                    ),
                    None => println!("Nothing was cancelled."),
                },
                None => println!("Usage: cancel <index>"),
            },
            "export" => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(index) => {
                    let all = bookings.list_bookings().await?;
                    match all.get(index) {
                        Some(booking) => {
                            println!("--- {} ---", export.export_file_name(booking));
                            println!("{}", export.booking_to_ics(booking));
                        }
                        None => println!("No booking at index {}.", index),
                    }
                }
                None => println!("Usage: export <index>"),
            },
            "clear" => {
                if bookings.clear_all_bookings(&prompt).await? {
                    notifier.notify("Data cleared", "All bookings have been deleted.");
                }
            }
            "sign" => {
                let name = prompt_line(&stdin, "Your name: ")?;
                let message = prompt_line(&stdin, "Your message: ")?;
                match guestbook.add_message(&name, &message).await? {
                    Some(_) => println!("Thanks for signing the guestbook!"),
                    None => println!("Both name and message are required."),
                }
            }
            "guestbook" => {
                let messages = guestbook.messages().await?;
                if messages.is_empty() {
                    println!("Be the first to leave a message.");
                }
                for message in messages {
                    println!("{} ({}): {}", message.name, message.date, message.message);
                }
            }
            "rsvp" => {
                let request = RsvpRequest {
                    name: prompt_line(&stdin, "Name: ")?,
                    email: prompt_line(&stdin, "Email: ")?,
                    phone: prompt_line(&stdin, "Phone (optional): ")?,
                    guests: prompt_line(&stdin, "Guests: ")?,
                    attending: prompt_line(&stdin, "Attending (yes/no): ")?,
                    dietary: prompt_line(&stdin, "Dietary restrictions (optional): ")?,
                    message: prompt_line(&stdin, "Message (optional): ")?,
                };
                match rsvps.submit(&request).await {
                    Ok(entry) => notifier.notify(
                        "RSVP received",
                        &format!("Thank you {}, your response has been recorded.", entry.name),
                    ),
                    Err(e) => notifier.notify("Error", &e.to_string()),
                }
            }
            "stats" => {
                let stats = rsvps.stats().await?;
                println!(
                    "RSVPs: {} total, {} attending, {} not attending, {} guests, {} dietary notes",
                    stats.total,
                    stats.attending,
                    stats.not_attending,
                    stats.total_guests,
                    stats.dietary_restrictions,
                );
            }
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for a list.", other),
        }
    }

    info!("Shutting down");
    Ok(())
}

async fn current_week(
    calendar: &CalendarService,
    bookings: &BookingService<BookingRepository>,
    selection: &SelectionService,
) -> anyhow::Result<CalendarWeek> {
    let now = Local::now().naive_local();
    let booked = bookings.booked_slot_keys().await?;
    Ok(calendar.generate_week(now.date(), now, &booked, selection.current()))
}

fn render_week(week: &CalendarWeek) {
    println!("Week of {}", week.week_start.format("%B %-d, %Y"));
    if week.days.is_empty() {
        println!("  (no bookable days this week)");
        return;
    }
    for day in &week.days {
        print!("  {} {}:", day.date.format("%a"), day.date);
        for slot in &day.slots {
            let marker = match slot.status {
                SlotStatus::Available if slot.selected => "*",
                SlotStatus::Available => " ",
                SlotStatus::Booked => "x",
                SlotStatus::Past => "-",
            };
            print!(" [{}{}]", slot.time.format("%H:%M"), marker);
        }
        println!();
    }
}

fn collect_booking_form(stdin: &io::Stdin) -> anyhow::Result<MapFormReader> {
    let mut form = MapFormReader::new();
    for (field, label) in [
        ("name", "Name: "),
        ("email", "Email: "),
        ("phone", "Phone: "),
        ("service", "Service (individual/monthly/quarterly): "),
        ("modality", "Modality (in-person/online): "),
        ("notes", "Notes (optional): "),
    ] {
        let value = prompt_line(stdin, label)?;
        form.insert(field, &value);
    }
    Ok(form)
}

fn prompt_line(stdin: &io::Stdin, label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut value = String::new();
    stdin.lock().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn print_help() {
    println!("Commands:");
    println!("  week              show the current week's slots");
    println!("  next / prev       navigate between weeks");
    println!("  select DATE TIME  select an available slot");
    println!("  book              book the selected slot");
    println!("  bookings          list bookings");
    println!("  cancel N          cancel booking N");
    println!("  export N          print booking N as an .ics event");
    println!("  sign / guestbook  sign or read the guestbook");
    println!("  rsvp / stats      submit an RSVP or show totals");
    println!("  clear             delete all bookings");
    println!("  quit              exit");
}
