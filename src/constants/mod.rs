pub struct Env {
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub database_url: String,
    pub run_migrations: bool,
    pub frontend_url: String,
    pub feed_limit: i64,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set in .env file or environment variable");
        let jwt_audience =
            std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let run_migrations = std::env::var("RUN_MIGRATIONS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .expect("RUN_MIGRATIONS must be true or false");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let feed_limit = std::env::var("FEED_LIMIT")
            .unwrap_or_else(|_| "50".to_string())
            .parse::<i64>()
            .expect("FEED_LIMIT must be a valid i64 integer");

        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env {
            jwt_secret,
            jwt_audience,
            database_url,
            run_migrations,
            frontend_url,
            feed_limit,
            ip,
            port,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// Moods offered while composing or filtering posts.
pub const COMMON_MOODS: &[&str] = &[
    "feeling happy 😊",
    "feeling excited 🤩",
    "feeling grateful 🙏",
    "feeling blessed ✨",
    "feeling loved ❤️",
    "feeling thoughtful 🤔",
    "feeling productive 💼",
    "watching a movie 🎬",
    "listening to music 🎧",
    "traveling ✈️",
    "working out 💪",
    "studying 📚",
    "celebrating 🎉",
];

pub const TAG_SUGGESTION_MIN_QUERY: usize = 2;
pub const TAG_SUGGESTION_LIMIT: i64 = 10;
