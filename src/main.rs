//! Console adapter for the intake wizard.
//!
//! A minimal reference view layer: reads line commands from stdin, feeds
//! them to the dispatcher and prints the events the wizard publishes. The
//! issued verification code is printed for demo purposes, standing in for a
//! real delivery channel.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use crossbeam_channel::Receiver;
use tracing_subscriber::EnvFilter;

use intake::facilities::FacilityDirectory;
use intake::messaging::{Command, Dispatcher, Event, EventBus};
use intake::patient::{fields, FieldValue};
use intake::triage::RuleBasedAssessor;
use intake::verification::DeliveryMethod;
use intake::wizard::WizardFlow;
use intake::WizardConfig;

// Stand-in for browser geolocation: midtown, near the demo directory
const DEMO_LATITUDE: f64 = 40.7549;
const DEMO_LONGITUDE: f64 = -73.9840;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_help() {
    println!("commands:");
    println!("  name|age|email|phone|symptoms <value>   set a text field");
    println!("  consent|location on|off                 set a consent checkbox");
    println!("  code <digits>                           enter the verification code");
    println!("  advance / back                          navigate");
    println!("  resend email|sms                        re-issue the code");
    println!("  reset                                   start over");
    println!("  quit                                    exit");
}

/// Map one input line onto a wizard command.
fn parse_line(line: &str, dispatcher: &Dispatcher) -> Option<Command> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (line, ""),
    };
    let current = dispatcher.flow().current_step();

    match verb {
        "name" | "age" | "email" | "phone" | "symptoms" | "code" => Some(Command::FieldChanged {
            field_id: verb.to_string(),
            value: FieldValue::Text(rest.to_string()),
        }),
        "consent" => Some(Command::FieldChanged {
            field_id: fields::CONSENT.to_string(),
            value: FieldValue::Checked(rest == "on"),
        }),
        "location" => Some(Command::FieldChanged {
            field_id: fields::LOCATION_CONSENT.to_string(),
            value: FieldValue::Checked(rest == "on"),
        }),
        "advance" => Some(Command::RequestAdvance { from: current }),
        "back" => Some(Command::RequestBack { from: current }),
        "reset" => Some(Command::RequestReset),
        "resend" => {
            let method = if rest.eq_ignore_ascii_case("sms") {
                DeliveryMethod::Sms
            } else {
                DeliveryMethod::Email
            };
            Some(Command::RequestResend { method })
        }
        _ => None,
    }
}

fn print_events(
    rx: &Receiver<Event>,
    dispatcher: &Dispatcher,
    directory: &FacilityDirectory,
    radius_miles: f64,
) {
    while let Ok(event) = rx.try_recv() {
        println!("  {}", event.description());

        match event {
            // Demo stand-in for a delivery channel
            Event::CodeIssued { .. } => {
                if let Some(code) = dispatcher.flow().issued_code() {
                    println!("  (demo) your code is {code}");
                }
            }
            Event::AssessmentReady { result } => {
                println!("  specialty:   {}", result.recommended_specialty);
                println!("  appointment: {}", result.appointment_window);
                println!("  urgency:     {}", result.urgency_text);
                print_nearby_facilities(dispatcher, directory, radius_miles);
            }
            _ => {}
        }
    }
}

fn print_nearby_facilities(
    dispatcher: &Dispatcher,
    directory: &FacilityDirectory,
    radius_miles: f64,
) {
    let consented = dispatcher
        .flow()
        .record()
        .map(|r| r.location_consent)
        .unwrap_or(false);
    if !consented {
        return;
    }

    println!("  nearby facilities:");
    for m in directory.nearby(DEMO_LATITUDE, DEMO_LONGITUDE, radius_miles) {
        println!(
            "    {} - {:.1} mi, ~{} min wait",
            m.facility.name, m.distance_miles, m.facility.wait_minutes
        );
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = match WizardConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "falling back to default configuration");
            WizardConfig::default()
        }
    };

    let bus = EventBus::new();
    let (rx, _id) = bus.subscribe();
    let flow = WizardFlow::new(&config, Box::new(RuleBasedAssessor::new()));
    let mut dispatcher = Dispatcher::new(flow, bus);
    let directory = FacilityDirectory::default();

    println!("triage-intake v{}", env!("CARGO_PKG_VERSION"));
    print_help();

    let stdin = io::stdin();
    loop {
        let step = dispatcher.flow().current_step();
        print!("[{}/4 {}] > ", step.number(), step.title());
        io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("reading stdin")?
            == 0
        {
            break; // EOF
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        if line == "help" {
            print_help();
            continue;
        }

        match parse_line(line, &dispatcher) {
            Some(command) => {
                dispatcher.dispatch(command);
                print_events(&rx, &dispatcher, &directory, config.facility_radius_miles);
            }
            None => println!("unknown command, try 'help'"),
        }
    }

    Ok(())
}
