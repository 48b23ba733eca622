use anyhow::Context;
use flexi_logger::Logger;
use lexopt::{Arg, Parser, ValueExt};
use std::ffi::OsString;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use weekno::{HostCalendar, WidgetEntry};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

static WEEKDAY_INITIALS: [char; 7] = ['M', 'T', 'W', 'T', 'F', 'S', 'S'];

const START_ENV_VAR: &str = "WEEKNO_START";

const DEFAULT_LOG_SPEC: &str = "warn";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Show {
        start: Option<Date>,
        date: Option<Date>,
        utc: bool,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut start = None;
        let mut date = None;
        let mut utc = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("start") => start = Some(parse_ymd(parser.value()?)?),
                Arg::Short('u') | Arg::Long("utc") => utc = true,
                Arg::Value(value) if date.is_none() => date = Some(parse_ymd(value)?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Show { start, date, utc })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Show { start, date, utc } => {
                // The local offset can only be read while this is the sole
                // thread, so look it up before the logger starts.
                let calendar = if utc {
                    HostCalendar::utc()
                } else {
                    HostCalendar::local().context("failed to determine local timezone")?
                };
                let _logger = Logger::try_with_env_or_str(DEFAULT_LOG_SPEC)
                    .context("invalid log specification")?
                    .start()
                    .context("failed to start logger")?;
                let today = calendar
                    .today()
                    .context("failed to determine current date")?;
                let epoch = resolve_epoch(start, std::env::var_os(START_ENV_VAR), today)?;
                log::debug!("Counting weeks from {epoch} (today is {today})");
                let entry = WidgetEntry::new(epoch, date.unwrap_or(today));
                for line in entry_lines(&entry) {
                    println!("{line}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: weekno [-s YYYY-MM-DD] [-u] [YYYY-MM-DD]");
                println!();
                println!("Show the number of weeks elapsed since a start date");
                println!();
                println!("Options:");
                println!("  -s, --start YYYY-MM-DD");
                println!("                    Count weeks from this date [env: {START_ENV_VAR}]");
                println!("                    [default: today]");
                println!();
                println!("  -u, --utc         Use UTC instead of the local timezone");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_ymd(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

/// Picks the epoch: `--start` if given, else a nonempty `env_value` (the
/// contents of `WEEKNO_START`), else `today`
fn resolve_epoch(
    start: Option<Date>,
    env_value: Option<OsString>,
    today: Date,
) -> anyhow::Result<Date> {
    if let Some(d) = start {
        return Ok(d);
    }
    match env_value {
        Some(value) if !value.is_empty() => {
            let Ok(value) = value.into_string() else {
                anyhow::bail!("{START_ENV_VAR} is not valid UTF-8");
            };
            Date::parse(&value, &YMD_FMT)
                .with_context(|| format!("invalid {START_ENV_VAR} value {value:?}"))
        }
        _ => Ok(today),
    }
}

fn entry_lines(entry: &WidgetEntry) -> [String; 4] {
    [
        String::from("WEEK NUMBER"),
        entry.week_number.to_string(),
        entry.label.clone(),
        weekday_indicator(entry.day_of_week),
    ]
}

/// Spells out the week as `M T W T F S S`, keeping only the initial of
/// `day_of_week` (Monday = 1) and replacing the others with dots
fn weekday_indicator(day_of_week: u8) -> String {
    let mut s = String::new();
    for (i, ch) in (1..).zip(WEEKDAY_INITIALS) {
        if i > 1 {
            s.push(' ');
        }
        s.push(if i == day_of_week { ch } else { '·' });
    }
    s
}
