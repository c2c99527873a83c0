use std::io::{self, Write};

use colored::Colorize;

use crate::db::DBClient;
use crate::models::SoundsPage;
use crate::sounds;

/// Prints every sound URL currently stored, one per line.
pub async fn list(db: &dyn DBClient) -> anyhow::Result<()> {
    let page = sounds::load(db).await?;
    write_listing(&mut io::stdout().lock(), &page)?;
    Ok(())
}

fn write_listing(out: &mut impl Write, page: &SoundsPage) -> io::Result<()> {
    if page.sounds.is_empty() {
        writeln!(out, "\nNo sounds found.")?;
        return Ok(());
    }

    writeln!(out, "Sounds ({}):", page.sounds.len())?;
    for sound in &page.sounds {
        match &sound.url {
            Some(url) => writeln!(out, "\t- {}", url)?,
            None => writeln!(out, "\t- {}", "<missing url>".yellow())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sound;

    fn render(page: &SoundsPage) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_listing(&mut buf, page).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn lists_each_url_and_flags_missing_ones() {
        let page = SoundsPage {
            sounds: vec![
                Sound { url: Some("a.mp3".to_string()) },
                Sound { url: None },
            ],
        };
        assert_eq!(render(&page), "Sounds (2):\n\t- a.mp3\n\t- <missing url>\n");
    }

    #[test]
    fn empty_page_says_so() {
        assert_eq!(render(&SoundsPage::default()), "\nNo sounds found.\n");
    }
}
