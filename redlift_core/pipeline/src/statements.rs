//! The four fixed statement groups: drop, create, copy, insert.
//!
//! Order matters. Drop and create mirror each other so a rerun of the
//! migrator is a schema no-op, and the insert list populates songplays
//! before time because the time transform reads songplays back.

use common::config::components::warehouse::WarehouseConfig;

/// Every table this pipeline owns, in drop/create order.
pub const TABLES: [&str; 7] = [
    "staging_events",
    "staging_songs",
    "songplays",
    "users",
    "songs",
    "artists",
    "time",
];

#[derive(Debug, Clone)]
pub struct Statement {
    pub table: &'static str,
    pub sql: String,
}

impl Statement {
    fn new(table: &'static str, sql: impl Into<String>) -> Self {
        Self {
            table,
            sql: sql.into(),
        }
    }
}

/// Values substituted into the COPY statements at call time. Rendering them
/// per call (instead of baking them into module-level strings) keeps one
/// statement template usable against any environment.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyParams {
    pub role_arn: String,
    pub log_data: String,
    pub song_data: String,
    pub log_jsonpath: String,
    pub region: String,
}

impl From<&WarehouseConfig> for CopyParams {
    fn from(config: &WarehouseConfig) -> Self {
        Self {
            role_arn: config.iam_role.arn.clone(),
            log_data: config.sources.log_data.clone(),
            song_data: config.sources.song_data.clone(),
            log_jsonpath: config.sources.log_jsonpath.clone(),
            region: config.sources.region.clone(),
        }
    }
}

/// Single-quote a literal for inclusion in statement text, doubling any
/// embedded quotes.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn drop_statements() -> Vec<Statement> {
    TABLES
        .iter()
        .map(|table| Statement::new(table, format!("DROP TABLE IF EXISTS {table};")))
        .collect()
}

pub fn create_statements() -> Vec<Statement> {
    vec![
        Statement::new(
            "staging_events",
            "CREATE TABLE staging_events (
    artist VARCHAR,
    auth VARCHAR,
    firstName VARCHAR,
    gender VARCHAR,
    itemInSession BIGINT,
    lastName VARCHAR,
    length FLOAT,
    level VARCHAR,
    location VARCHAR,
    method VARCHAR,
    page VARCHAR,
    registration FLOAT,
    sessionId BIGINT,
    song VARCHAR,
    status INT,
    ts BIGINT,
    userAgent VARCHAR,
    userId BIGINT
);",
        ),
        Statement::new(
            "staging_songs",
            "CREATE TABLE staging_songs (
    num_songs INT,
    artist_id VARCHAR,
    artist_latitude FLOAT,
    artist_longitude FLOAT,
    artist_location VARCHAR,
    artist_name VARCHAR,
    song_id VARCHAR,
    title VARCHAR,
    duration FLOAT,
    year INT
);",
        ),
        Statement::new(
            "songplays",
            "CREATE TABLE songplays (
    songplay_id INT IDENTITY(0,1) PRIMARY KEY NOT NULL,
    start_time BIGINT,
    user_id BIGINT NOT NULL,
    level VARCHAR,
    song_id VARCHAR,
    artist_id VARCHAR,
    session_id BIGINT,
    location VARCHAR,
    user_agent VARCHAR
);",
        ),
        Statement::new(
            "users",
            "CREATE TABLE users (
    user_id BIGINT PRIMARY KEY NOT NULL,
    first_name VARCHAR,
    last_name VARCHAR,
    gender VARCHAR,
    level VARCHAR
);",
        ),
        Statement::new(
            "songs",
            "CREATE TABLE songs (
    song_id VARCHAR PRIMARY KEY NOT NULL,
    title VARCHAR,
    artist_id VARCHAR,
    year INT,
    duration FLOAT
);",
        ),
        Statement::new(
            "artists",
            "CREATE TABLE artists (
    artist_id VARCHAR PRIMARY KEY NOT NULL,
    name VARCHAR,
    location VARCHAR,
    latitude FLOAT,
    longitude FLOAT
);",
        ),
        Statement::new(
            "time",
            "CREATE TABLE time (
    start_time TIMESTAMP NOT NULL SORTKEY,
    hour INT,
    day INT,
    week INT,
    month INT,
    year INT,
    weekday INT
);",
        ),
    ]
}

pub fn copy_statements(params: &CopyParams) -> Vec<Statement> {
    vec![
        Statement::new(
            "staging_events",
            format!(
                "COPY staging_events FROM {}
IAM_ROLE {}
REGION {}
FORMAT AS JSON {};",
                quote(&params.log_data),
                quote(&params.role_arn),
                quote(&params.region),
                quote(&params.log_jsonpath),
            ),
        ),
        Statement::new(
            "staging_songs",
            format!(
                "COPY staging_songs FROM {}
IAM_ROLE {}
REGION {}
FORMAT AS JSON 'auto';",
                quote(&params.song_data),
                quote(&params.role_arn),
                quote(&params.region),
            ),
        ),
    ]
}

pub fn insert_statements() -> Vec<Statement> {
    vec![
        // Fact table: one row per NextSong event. The LEFT JOIN keeps events
        // whose song has no match in the catalog; those rows carry NULL
        // song/artist ids.
        Statement::new(
            "songplays",
            "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
SELECT se.ts, se.userId, se.level, ss.song_id, ss.artist_id, se.sessionId, se.location, se.userAgent
FROM staging_events se
LEFT JOIN staging_songs ss ON se.song = ss.title AND se.artist = ss.artist_name
WHERE se.page = 'NextSong' AND se.userId IS NOT NULL;",
        ),
        Statement::new(
            "users",
            "INSERT INTO users (user_id, first_name, last_name, gender, level)
SELECT DISTINCT userId, firstName, lastName, gender, level
FROM staging_events
WHERE userId IS NOT NULL;",
        ),
        Statement::new(
            "songs",
            "INSERT INTO songs (song_id, title, artist_id, year, duration)
SELECT DISTINCT song_id, title, artist_id, year, duration
FROM staging_songs;",
        ),
        Statement::new(
            "artists",
            "INSERT INTO artists (artist_id, name, location, latitude, longitude)
SELECT DISTINCT artist_id, artist_name, artist_location, artist_latitude, artist_longitude
FROM staging_songs;",
        ),
        // Epoch milliseconds into calendar parts, derived from the fact rows
        // loaded above. Must stay last in this list.
        Statement::new(
            "time",
            "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
WITH converted AS (
    SELECT (TIMESTAMP 'epoch' + start_time / 1000 * INTERVAL '1 second') AS ts
    FROM songplays
)
SELECT ts,
       DATE_PART(hour, ts),
       DATE_PART(dayofyear, ts),
       DATE_PART(week, ts),
       DATE_PART(month, ts),
       DATE_PART(year, ts),
       DATE_PART(dow, ts)
FROM converted;",
        ),
    ]
}
