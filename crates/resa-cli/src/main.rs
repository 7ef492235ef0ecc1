use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use resa_cli::{parse_seat_list, render};
use resa_core::models::Flight;
use resa_core::AircraftCatalog;
use resa_sdk::ResaClient;

#[derive(Parser, Debug)]
#[command(name = "resa", about = "Flight reservation client", version)]
struct Cli {
    /// Booking server URL
    #[arg(long, global = true, default_value = "http://localhost:3000")]
    url: String,

    /// Login email (required for booking and reservation commands)
    #[arg(long, global = true)]
    email: Option<String>,

    /// Login password
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List scheduled flights
    Flights {
        /// Filter by destination airport code
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the seat map for a flight
    Map {
        #[arg(long)]
        flight: u32,
    },
    /// Book seats on a flight, e.g. --seats 12A,12B
    Book {
        #[arg(long)]
        flight: u32,
        #[arg(long)]
        seats: String,
    },
    /// List your reservations
    Reservations,
    /// Cancel a pending reservation
    Cancel {
        #[arg(long)]
        reservation: u32,
    },
    /// Settle a pending reservation (or refund with --refund)
    Pay {
        #[arg(long)]
        reservation: u32,
        #[arg(long)]
        refund: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut client = ResaClient::new(cli.url.clone());
    let catalog = AircraftCatalog::standard();

    match cli.command {
        Command::Flights { to } => {
            let flights = client.flights().await?;
            let flights: Vec<Flight> = match &to {
                Some(code) => flights
                    .into_iter()
                    .filter(|f| f.destination.code.eq_ignore_ascii_case(code))
                    .collect(),
                None => flights,
            };
            if flights.is_empty() {
                println!("No flights found");
                return Ok(());
            }
            for flight in flights {
                println!(
                    "{:>3}  {}  {} {} -> {} {}  {}  {}  from ${}",
                    flight.id,
                    flight.flight_number,
                    flight.origin.code,
                    flight.origin.time,
                    flight.destination.code,
                    flight.destination.time,
                    flight.date,
                    flight.aircraft_model,
                    flight.price
                );
            }
        }
        Command::Map { flight } => {
            let flights = client.flights().await?;
            let flight = flights
                .iter()
                .find(|f| f.id == flight)
                .with_context(|| format!("flight {flight} not found"))?;
            let availability = client.seat_availability(flight.id).await?;
            let layout = catalog.layout(flight.aircraft);
            println!(
                "{} {} -> {}  ({})",
                flight.flight_number, flight.origin.code, flight.destination.code,
                flight.aircraft_model
            );
            println!("{}", render::render_seat_map(layout, &availability, &[])?);
        }
        Command::Book { flight, seats } => {
            login(&mut client, &cli.email, &cli.password).await?;
            let flights = client.flights().await?;
            let flight = flights
                .iter()
                .find(|f| f.id == flight)
                .with_context(|| format!("flight {flight} not found"))?;
            let layout = catalog.layout(flight.aircraft);
            let seat_ids = parse_seat_list(&seats, layout)?;
            if seat_ids.is_empty() {
                bail!("no seats given");
            }

            let reservation = client.book_seats(flight.id, seat_ids).await?;
            println!(
                "Reservation {} created: seats {} on {} (${})",
                reservation.reservation_id,
                reservation.seat_codes.join(", "),
                flight.flight_number,
                reservation.total_price
            );
            println!(
                "Hold expires at {}; pay with: resa pay --reservation {}",
                reservation.hold_expires_at.format("%H:%M:%S UTC"),
                reservation.reservation_id
            );
        }
        Command::Reservations => {
            login(&mut client, &cli.email, &cli.password).await?;
            let reservations = client.reservations().await?;
            if reservations.is_empty() {
                println!("No reservations");
                return Ok(());
            }
            for r in reservations {
                println!(
                    "{:>4}  flight {}  seats {}  {}  ${}",
                    r.reservation_id,
                    r.external_flight_id,
                    r.seat_codes.join(","),
                    r.status,
                    r.total_price
                );
            }
        }
        Command::Cancel { reservation } => {
            login(&mut client, &cli.email, &cli.password).await?;
            let cancelled = client.cancel_reservation(reservation).await?;
            println!(
                "Reservation {} cancelled, seats released",
                cancelled.reservation_id
            );
        }
        Command::Pay {
            reservation,
            refund,
        } => {
            login(&mut client, &cli.email, &cli.password).await?;
            let settled = if refund {
                client.cancel_payment(reservation).await?
            } else {
                client.confirm_payment(reservation).await?
            };
            println!("Reservation {} is now {}", settled.reservation_id, settled.status);
        }
    }

    Ok(())
}

async fn login(
    client: &mut ResaClient,
    email: &Option<String>,
    password: &Option<String>,
) -> Result<()> {
    let email = email
        .as_deref()
        .context("this command needs --email and --password")?;
    let password = password
        .as_deref()
        .context("this command needs --email and --password")?;
    let user_id = client
        .login(email, password)
        .await
        .context("login failed")?;
    eprintln!("Logged in as user {user_id}");
    Ok(())
}
