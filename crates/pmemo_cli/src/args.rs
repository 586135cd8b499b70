//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use pmemo_core::model::page::DEFAULT_PAGE_LIMIT;
use pmemo_core::{
    default_log_level, CoreConfig, DatabaseConfig, LoggingConfig, MemoId, Page, TagId, UserId,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pmemo", version, about = "Multi-user memo and tag store")]
pub struct Cli {
    /// SQLite database file; an in-memory database is used when omitted.
    #[arg(long, env = "PMEMO_DB_PATH", global = true)]
    pub db: Option<PathBuf>,

    #[arg(long, env = "PMEMO_DB_BUSY_TIMEOUT_MS", default_value_t = 5_000, global = true)]
    pub busy_timeout_ms: u64,

    #[arg(long, env = "PMEMO_LOG_LEVEL", default_value_t = default_log_level().to_string(), global = true)]
    pub log_level: String,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, env = "PMEMO_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Authenticated caller id; accepted before or after the subcommand.
    #[arg(long, short = 'u', env = "PMEMO_USER", global = true)]
    pub user: Option<UserId>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Caller id; every command requires one.
    pub fn caller(&self) -> anyhow::Result<UserId> {
        self.user
            .ok_or_else(|| anyhow::anyhow!("missing caller id: pass --user or set PMEMO_USER"))
    }

    pub fn core_config(&self) -> CoreConfig {
        CoreConfig {
            database: DatabaseConfig {
                path: self.db.clone(),
                busy_timeout_ms: self.busy_timeout_ms,
            },
            logging: LoggingConfig {
                level: self.log_level.clone(),
                dir: self.log_dir.clone(),
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Memo operations.
    #[command(subcommand)]
    Memo(MemoCommand),
    /// Tag operations.
    #[command(subcommand)]
    Tag(TagCommand),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memo(MemoCommand::List { .. }) => "memo_list",
            Self::Memo(MemoCommand::Create { .. }) => "memo_create",
            Self::Memo(MemoCommand::Get { .. }) => "memo_get",
            Self::Memo(MemoCommand::Update { .. }) => "memo_update",
            Self::Memo(MemoCommand::Delete { .. }) => "memo_delete",
            Self::Memo(MemoCommand::Search { .. }) => "memo_search",
            Self::Tag(TagCommand::List { .. }) => "tag_list",
            Self::Tag(TagCommand::Create { .. }) => "tag_create",
            Self::Tag(TagCommand::Get { .. }) => "tag_get",
            Self::Tag(TagCommand::Update { .. }) => "tag_update",
            Self::Tag(TagCommand::Delete { .. }) => "tag_delete",
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    #[arg(long, default_value_t = 0)]
    pub skip: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: u32,
}

impl From<PageArgs> for Page {
    fn from(value: PageArgs) -> Self {
        Page::new(value.skip, value.limit)
    }
}

#[derive(Subcommand, Debug)]
pub enum MemoCommand {
    /// List your memos.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long)]
        public: bool,
        /// Tag id to attach; repeatable.
        #[arg(long = "tag")]
        tags: Vec<TagId>,
    },
    Get {
        id: MemoId,
    },
    /// Update only the given fields.
    Update {
        id: MemoId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        public: Option<bool>,
        /// Replace tags with these ids; repeatable.
        #[arg(long = "tag", conflicts_with = "clear_tags")]
        tags: Vec<TagId>,
        /// Detach all tags.
        #[arg(long)]
        clear_tags: bool,
    },
    Delete {
        id: MemoId,
    },
    /// Substring search over title and content (at least 3 characters).
    Search {
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// List your tags.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Create {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    Get {
        id: TagId,
    },
    /// Replace name and color.
    Update {
        id: TagId,
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        id: TagId,
    },
}
