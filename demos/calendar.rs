use std::{io::{BufWriter, Write},
          fs::File,
          error::Error};
use chrono::{Datelike, NaiveDate};
use rgb::RGB8;
use colormash::{daily, hex_string, hsl_to_rgb, score};

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        let css = hex_string(c);
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {css}\" title=\"{css}\"></td>")?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td></tr></table>")?;
    Ok(())
}

fn month_of_targets(fh: &mut impl Write, year: i32, month: u32) -> Result<(), Err> {
    let mut day = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let mut colors = vec![];
    while day.month() == month {
        colors.push(daily::target(&day.format("%Y-%m-%d").to_string()));
        day = day.succ_opt().unwrap();
    }
    table_of_colors(fh, &colors, 24, &format!("{year}-{month:02}"))
}

/// A sweep of same-vividness guesses against one day's target, with a
/// gray strip underneath showing how the score falls off.
fn score_falloff(fh: &mut impl Write, key: &str) -> Result<(), Err> {
    let target = daily::target(key);
    let guesses: Vec<_> = (0..120).map(|i| hsl_to_rgb(3. * i as f64,
                                                      daily::SATURATION,
                                                      daily::LIGHTNESS))
        .collect();
    table_of_colors(fh, &guesses, 6, &format!("guess sweep vs {key}"))?;
    let scores: Vec<_> = guesses.iter()
        .map(|&g| { let s = score(target, g);
                    let v = (s as u32 * 255 / 100) as u8;
                    RGB8 { r: v, g: v, b: v } })
        .collect();
    table_of_colors(fh, &scores, 6, "score (white = 100)")
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("calendar.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>colormash: daily targets</title>\n\
                  </head>\n\
                  <body>")?;
    writeln!(fh, "<h3>Daily targets, 2024</h3>")?;
    for month in 1..=12 {
        month_of_targets(&mut fh, 2024, month)?;
    }
    writeln!(fh, "<h3>Score falloff around {}</h3>",
             daily::target_hex("2024-01-01"))?;
    score_falloff(&mut fh, "2024-01-01")?;
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
