use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;

use tunescout::{
    Error, Result, apple_music, cli, config, deezer, error, qobuz, spotify, tidal, warning,
    youtube,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log level written to stderr (off, error, warn, info, debug, trace)
    #[clap(long, global = true, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the Spotify catalog and look up tracks or albums
    Spotify(SpotifyOptions),

    /// Query the Tidal catalog, search and stream URLs
    Tidal(TidalOptions),

    /// Search Deezer and fetch track details or track lists
    Deezer(DeezerOptions),

    /// Search Qobuz and fetch details, streams, album and track lists
    Qobuz(QobuzOptions),

    /// Search YouTube or list the tracks of a playlist
    Youtube(YouTubeOptions),

    /// Search Apple Music through the iTunes Search API
    AppleMusic(AppleMusicOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
pub struct SpotifyOptions {
    #[clap(long, group = "action")]
    search_track: Option<String>,
    #[clap(long, group = "action")]
    search_album: Option<String>,
    #[clap(long, group = "action")]
    search_playlist: Option<String>,
    #[clap(long, group = "action")]
    search_episode: Option<String>,
    #[clap(long, group = "action")]
    search_artist: Option<String>,
    /// Search podcasts (Spotify shows)
    #[clap(long, group = "action")]
    search_podcast: Option<String>,
    #[clap(long, group = "action")]
    get_track: Option<String>,
    #[clap(long, group = "action")]
    get_album: Option<String>,

    /// Maximum number of search results
    #[clap(long, default_value_t = 10)]
    limit: u32,
}

impl SpotifyOptions {
    fn action(self) -> Option<cli::SpotifyAction> {
        use cli::SpotifyAction::*;
        use spotify::SearchKind;

        let search = |kind: SearchKind, query: Option<String>| query.map(|q| Search(kind, q));
        search(SearchKind::Track, self.search_track)
            .or_else(|| search(SearchKind::Album, self.search_album))
            .or_else(|| search(SearchKind::Playlist, self.search_playlist))
            .or_else(|| search(SearchKind::Episode, self.search_episode))
            .or_else(|| search(SearchKind::Artist, self.search_artist))
            .or_else(|| search(SearchKind::Show, self.search_podcast))
            .or_else(|| self.get_track.map(Track))
            .or_else(|| self.get_album.map(Album))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
pub struct TidalOptions {
    /// ISO country code used for catalog lookups
    #[clap(long, default_value = tidal::DEFAULT_COUNTRY_CODE)]
    country_code: String,

    #[clap(long, group = "action")]
    get_track: Option<String>,
    #[clap(long, group = "action")]
    get_album: Option<String>,
    /// Album id or a link containing `album/<id>`
    #[clap(long, group = "action")]
    get_track_list: Option<String>,
    #[clap(long, group = "action")]
    search_track: Option<String>,
    #[clap(long, group = "action")]
    search_album: Option<String>,
    #[clap(long, group = "action")]
    search_artist: Option<String>,
    #[clap(long, group = "action")]
    search_playlist: Option<String>,
    #[clap(long, group = "action")]
    search_video: Option<String>,
    /// Track id to resolve a stream URL for
    #[clap(long, group = "action")]
    get_stream: Option<String>,

    /// User access token for stream URLs
    #[clap(long, requires = "get_stream")]
    user_token: Option<String>,

    /// Maximum number of search results
    #[clap(long, default_value_t = 30)]
    limit: u32,
}

impl TidalOptions {
    fn action(self) -> Option<cli::TidalAction> {
        use cli::TidalAction::*;
        use tidal::SearchKind;

        let user_token = self.user_token;
        let search = |kind: SearchKind, query: Option<String>| query.map(|q| Search(kind, q));
        self.get_track
            .map(Track)
            .or_else(|| self.get_album.map(Album))
            .or_else(|| self.get_track_list.map(TrackList))
            .or_else(|| search(SearchKind::Tracks, self.search_track))
            .or_else(|| search(SearchKind::Albums, self.search_album))
            .or_else(|| search(SearchKind::Artists, self.search_artist))
            .or_else(|| search(SearchKind::Playlists, self.search_playlist))
            .or_else(|| search(SearchKind::Videos, self.search_video))
            .or_else(|| {
                self.get_stream.map(|track_id| Stream {
                    track_id,
                    user_token,
                })
            })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
pub struct DeezerOptions {
    /// Track id to fetch details for
    #[clap(long, group = "action")]
    get_details: Option<String>,
    #[clap(long, group = "action")]
    search_track: Option<String>,
    #[clap(long, group = "action")]
    search_album: Option<String>,
    #[clap(long, group = "action")]
    search_artist: Option<String>,
    #[clap(long, group = "action")]
    search_playlist: Option<String>,
    /// `album/<id>` or `playlist/<id>`
    #[clap(long, group = "action")]
    get_track_list: Option<String>,
}

impl DeezerOptions {
    fn action(self) -> Option<cli::DeezerAction> {
        use cli::DeezerAction::*;
        use deezer::SearchKind;

        let search = |kind: SearchKind, query: Option<String>| query.map(|q| Search(kind, q));
        self.get_details
            .map(Details)
            .or_else(|| search(SearchKind::Track, self.search_track))
            .or_else(|| search(SearchKind::Album, self.search_album))
            .or_else(|| search(SearchKind::Artist, self.search_artist))
            .or_else(|| search(SearchKind::Playlist, self.search_playlist))
            .or_else(|| self.get_track_list.map(TrackList))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
pub struct QobuzOptions {
    #[clap(long, group = "action")]
    search_track: Option<String>,
    #[clap(long, group = "action")]
    search_artist: Option<String>,
    #[clap(long, group = "action")]
    search_album: Option<String>,
    #[clap(long, group = "action")]
    search_playlist: Option<String>,
    /// Track id to fetch details for
    #[clap(long, group = "action")]
    get_details: Option<String>,
    /// Track id to resolve a file URL for
    #[clap(long, group = "action")]
    get_stream: Option<String>,
    /// Artist id whose albums are listed
    #[clap(long, group = "action")]
    get_album_list: Option<String>,
    /// `album/<id>`, `playlist/<id>` or `artist/<id>`
    #[clap(long, group = "action")]
    get_track_list: Option<String>,

    /// Stream format (5 = MP3 320, 6 = FLAC 16-bit, 7/27 = FLAC hi-res)
    #[clap(long, default_value_t = qobuz::DEFAULT_FORMAT_ID)]
    format_id: u32,
}

impl QobuzOptions {
    fn action(self) -> Option<cli::QobuzAction> {
        use cli::QobuzAction::*;
        use qobuz::SearchKind;

        let format_id = self.format_id;
        let search = |kind: SearchKind, query: Option<String>| query.map(|q| Search(kind, q));
        search(SearchKind::Track, self.search_track)
            .or_else(|| search(SearchKind::Artist, self.search_artist))
            .or_else(|| search(SearchKind::Album, self.search_album))
            .or_else(|| search(SearchKind::Playlist, self.search_playlist))
            .or_else(|| self.get_details.map(Details))
            .or_else(|| {
                self.get_stream.map(|track_id| Stream {
                    track_id,
                    format_id,
                })
            })
            .or_else(|| self.get_album_list.map(AlbumList))
            .or_else(|| self.get_track_list.map(TrackList))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
pub struct YouTubeOptions {
    /// Search query
    #[clap(short, long, group = "action")]
    query: Option<String>,

    /// Kind of search result
    #[clap(short = 't', long = "type", value_enum, default_value = "video")]
    kind: youtube::SearchKind,

    /// Maximum number of search results
    #[clap(short, long, default_value_t = youtube::DEFAULT_MAX_RESULTS)]
    max_results: u32,

    /// `playlist/<id>` or a bare playlist id
    #[clap(long, group = "action")]
    get_track_list: Option<String>,
}

impl YouTubeOptions {
    fn action(self) -> Option<cli::YouTubeAction> {
        let (kind, max_results) = (self.kind, self.max_results);
        self.query
            .map(|query| cli::YouTubeAction::Search {
                kind,
                query,
                max_results,
            })
            .or_else(|| self.get_track_list.map(cli::YouTubeAction::TrackList))
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AppleMusicOptions {
    /// Search term
    term: String,

    #[clap(long, value_enum, default_value = "track")]
    media_type: apple_music::MediaType,

    /// Maximum number of results
    #[clap(long, default_value_t = apple_music::DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_logging(level: &str) {
    let level: LevelFilter = match level.parse() {
        Ok(level) => level,
        Err(_) => error!("Invalid log level '{}'", level),
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn missing_action() -> Error {
    Error::Input("exactly one action flag is required".to_string())
}

async fn run(command: Command) -> Result<Value> {
    let config = config::Config::load().await?;

    match command {
        Command::Spotify(opt) => {
            let limit = opt.limit;
            let action = opt.action().ok_or_else(missing_action)?;
            cli::spotify(&config, action, limit).await
        }
        Command::Tidal(opt) => {
            let (country_code, limit) = (opt.country_code.clone(), opt.limit);
            let action = opt.action().ok_or_else(missing_action)?;
            cli::tidal(&config, action, &country_code, limit).await
        }
        Command::Deezer(opt) => {
            let action = opt.action().ok_or_else(missing_action)?;
            cli::deezer(&config, action).await
        }
        Command::Qobuz(opt) => {
            let action = opt.action().ok_or_else(missing_action)?;
            cli::qobuz(&config, action).await
        }
        Command::Youtube(opt) => {
            let action = opt.action().ok_or_else(missing_action)?;
            cli::youtube(&config, action).await
        }
        Command::AppleMusic(opt) => {
            cli::apple_music(&config, &opt.term, opt.media_type, opt.limit).await
        }
        Command::Completions(_) => Err(Error::Input(
            "completions are generated without a configuration".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    init_logging(&cli.log_level);

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let output = run(cli.command).await.and_then(|value| cli::render(&value));
    match output {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            tracing::debug!(kind = e.kind(), "command failed");
            println!("{}", cli::render_error(&e));
            std::process::exit(1);
        }
    }
}
