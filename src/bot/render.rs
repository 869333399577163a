use crate::constants::replies;
use crate::models::movie::Movie;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// HTML card shown for a candidate, both with and without vote buttons.
#[must_use]
pub fn movie_card(movie: &Movie) -> String {
    format!(
        "<b>Title:</b> {}\n<b>Year:</b> {}\n<b>Plot:</b> {}\n<a href=\"{}\">Poster</a>",
        encode_text(&movie.title),
        encode_text(&movie.year),
        encode_text(&movie.plot),
        encode_double_quoted_attribute(&movie.poster),
    )
}

/// Plain-text title list.
#[must_use]
pub fn backlog(movies: &[Movie]) -> String {
    let mut text = String::from(replies::BACKLOG_HEADER);
    if movies.is_empty() {
        text.push_str(replies::BACKLOG_EMPTY);
        return text;
    }

    for movie in movies {
        text.push_str(&movie.title);
        text.push('\n');
    }
    text
}

/// Reply for a lookup the service answered with `Response: "False"`.
#[must_use]
pub fn not_found(movie: &Movie) -> String {
    if movie.error.trim().is_empty() {
        replies::MOVIE_NOT_FOUND.to_string()
    } else {
        movie.error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            year: "1999".to_string(),
            plot: "A hacker learns the truth.".to_string(),
            poster: "https://example.com/p.jpg".to_string(),
            ..Movie::default()
        }
    }

    #[test]
    fn card_layout() {
        assert_eq!(
            movie_card(&movie("The Matrix")),
            "<b>Title:</b> The Matrix\n<b>Year:</b> 1999\n<b>Plot:</b> A hacker learns the truth.\n<a href=\"https://example.com/p.jpg\">Poster</a>"
        );
    }

    #[test]
    fn card_escapes_markup() {
        let mut m = movie("Tom & Jerry <3");
        m.poster = "https://example.com/a\"b.jpg".to_string();
        let card = movie_card(&m);
        assert!(card.contains("Tom &amp; Jerry &lt;3"));
        assert!(card.contains("href=\"https://example.com/a&quot;b.jpg\""));
    }

    #[test]
    fn empty_backlog() {
        assert_eq!(backlog(&[]), "Current backlog:\nEmpty");
    }

    #[test]
    fn backlog_lists_one_title_per_line() {
        assert_eq!(
            backlog(&[movie("Alien"), movie("Heat")]),
            "Current backlog:\nAlien\nHeat\n"
        );
    }

    #[test]
    fn not_found_prefers_upstream_error() {
        let mut m = Movie::default();
        assert_eq!(not_found(&m), "Movie not found!");
        m.error = "Incorrect IMDb ID.".to_string();
        assert_eq!(not_found(&m), "Incorrect IMDb ID.");
    }
}
