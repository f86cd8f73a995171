use std::io::{self, Write};

use awl_core::model::{BinType, Pickup, Schedule, StreetEntry};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

pub(crate) fn next_pickup(out: &mut impl Write, pickup: Option<&Pickup>) -> io::Result<()> {
    match pickup {
        Some(pickup) => writeln!(
            out,
            "Next pickup: {} {}",
            pickup.formatted_date(),
            pickup.bins.join(",")
        ),
        None => writeln!(out, "Did not find a next pickup"),
    }
}

pub(crate) fn schedule(out: &mut impl Write, schedule: Option<&Schedule>) -> io::Result<()> {
    let Some(schedule) = schedule.filter(|schedule| !schedule.is_empty()) else {
        return writeln!(out, "No schedule available");
    };
    for day in schedule.days() {
        for bin in &day.bins {
            writeln!(out, "{} {bin}", day.date)?;
        }
    }
    Ok(())
}

pub(crate) fn streets(out: &mut impl Write, streets: &[StreetEntry]) -> io::Result<()> {
    for street in streets {
        writeln!(
            out,
            "StrasseNummer: {} | StrasseName: {} | BlockedNR: [{}]",
            street.code,
            street.name,
            street.blocked_house_numbers.join(", ")
        )?;
    }
    Ok(())
}

pub(crate) fn invalid_bin(out: &mut impl Write, raw: &str) -> io::Result<()> {
    let choices: Vec<String> = BinType::ALL
        .iter()
        .map(|bin| format!("{} ({})", bin.code(), bin.label()))
        .collect();
    writeln!(
        out,
        "{raw} is not a valid bin type, use one of: {}",
        choices.join(", ")
    )
}

/// Clear the terminal and explain how to fill in the configuration.
pub(crate) fn config_help(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "No valid awl.conf provided!")?;
    writeln!(out)?;
    writeln!(out, "Run `awl streets [PATTERN]` to list the streets of Neuss.")?;
    writeln!(
        out,
        "Put the StrasseNummer of your street and your HausNummer into the configuration file:"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        r#"  {{ "config": {{ "StrasseNummer": "123", "StrasseName": null, "HausNummer": "39" }} }}"#
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "If more than one street name matches, use the StrasseNummer whose BlockedNR list"
    )?;
    writeln!(out, "does not contain your house number.")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io;

    use awl_core::model::{CollectionDay, MonthGroup, MonthKey, Pickup, Schedule, StreetEntry};
    use chrono::NaiveDate;

    use super::{config_help, invalid_bin, next_pickup, schedule, streets};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).expect("write to buffer");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn next_pickup_lines() {
        let pickup = Pickup {
            date: date(2024, 4, 20),
            bins: vec!["grau".to_owned(), "blau".to_owned()],
        };
        assert_eq!(
            render(|out| next_pickup(out, Some(&pickup))),
            "Next pickup: Saturday, 20 April 2024 grau,blau\n",
            "found"
        );
        assert_eq!(
            render(|out| next_pickup(out, None)),
            "Did not find a next pickup\n",
            "not found"
        );
    }

    #[test]
    fn schedule_lines() {
        let key = "3-2024".parse::<MonthKey>().expect("valid key");
        let data = Schedule {
            months: vec![MonthGroup {
                key,
                days: vec![
                    CollectionDay {
                        date: date(2024, 4, 20),
                        bins: vec!["grau".to_owned(), "blau".to_owned()],
                    },
                    CollectionDay {
                        date: date(2024, 4, 24),
                        bins: vec!["gelb".to_owned()],
                    },
                ],
            }],
        };
        assert_eq!(
            render(|out| schedule(out, Some(&data))),
            "2024-04-20 grau\n2024-04-20 blau\n2024-04-24 gelb\n",
            "one line per bin"
        );
        assert_eq!(
            render(|out| schedule(out, None)),
            "No schedule available\n",
            "none"
        );
    }

    #[test]
    fn street_lines() {
        let entries = [StreetEntry {
            code: "123".to_owned(),
            name: "Goethestrasse".to_owned(),
            blocked_house_numbers: vec!["1".to_owned(), "3".to_owned()],
        }];
        assert_eq!(
            render(|out| streets(out, &entries)),
            "StrasseNummer: 123 | StrasseName: Goethestrasse | BlockedNR: [1, 3]\n",
            "street line"
        );
    }

    #[test]
    fn invalid_bin_lists_codes() {
        assert_eq!(
            render(|out| invalid_bin(out, "rot")),
            "rot is not a valid bin type, use one of: blau (Papier), braun (Bioabfall), \
             gelb (Wertstoffe), grau (Restabfall), pink (Restabfall (pink))\n",
            "usage message"
        );
    }

    #[test]
    fn help_mentions_street_search() {
        let text = render(config_help);
        assert!(text.contains("No valid awl.conf provided!"), "headline");
        assert!(text.contains("awl streets"), "search hint");
    }
}
