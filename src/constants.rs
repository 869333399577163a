pub mod buttons {

    pub const NEXT: &str = "Next";

    pub const BACK: &str = "Back";

    pub const TUTORIAL: &str = "Tutorial";

    pub const MOVIE_YES: &str = "movie-yes";

    pub const MOVIE_NO: &str = "movie-no";

    pub const MOVIE_YES_LABEL: &str = "Yes, post in chat";

    pub const MOVIE_NO_LABEL: &str = "No, ditch it";
}

pub mod links {

    pub const TUTORIAL_URL: &str = "https://core.telegram.org/bots/api";
}

pub mod polling {
    use std::time::Duration;

    /// Long-poll timeout handed to `getUpdates`.
    pub const TIMEOUT: Duration = Duration::from_secs(60);
}

pub mod replies {

    pub const MISSING_TITLE: &str = "Please provide a movie title";

    pub const MOVIE_NOT_FOUND: &str = "Movie not found!";

    pub const BACKLOG_HEADER: &str = "Current backlog:\n";

    pub const BACKLOG_EMPTY: &str = "Empty";
}
