use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

pub const TOOL_NAMES: &[&str] = &[
    "fastfetch",
    "neofetch",
    "curl",
    "wget",
    "htop",
    "ps",
    "df",
    "lsblk",
    "free",
    "uptime",
    "whoami",
    "uname",
    "lscpu",
    "netstat",
    "ss",
    "ping",
    "traceroute",
    "dig",
    "nslookup",
    "git status",
    "docker ps",
    "kubectl get pods",
];

const PERIOD: Duration = Duration::from_secs(1);
const SETTLE: Duration = Duration::from_millis(100);
const FADE: Duration = Duration::from_millis(250);

/// What the rotating label shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFrame {
    pub text: String,
    pub visible: bool,
}

/// Owns the task that cycles the label. Dropping the rotator stops the task,
/// and so does dropping every receiver of the label.
#[derive(Debug)]
pub struct LabelRotator {
    task: JoinHandle<()>,
}

impl LabelRotator {
    /// Spawns the rotation on the current Tokio runtime.
    pub fn spawn(names: Vec<String>) -> (Self, watch::Receiver<LabelFrame>) {
        let first = names.first().cloned().unwrap_or_default();
        let (tx, rx) = watch::channel(LabelFrame {
            text: first,
            visible: true,
        });
        let task = tokio::spawn(rotate(names, tx));
        (Self { task }, rx)
    }

    pub fn spawn_default() -> (Self, watch::Receiver<LabelFrame>) {
        Self::spawn(TOOL_NAMES.iter().map(|name| name.to_string()).collect())
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LabelRotator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn rotate(names: Vec<String>, tx: watch::Sender<LabelFrame>) {
    if names.len() < 2 {
        return;
    }

    let mut ticks = time::interval_at(Instant::now() + PERIOD, PERIOD);
    let mut index = 0;
    loop {
        ticks.tick().await;
        time::sleep(SETTLE).await;

        let hidden = LabelFrame {
            text: names[index].clone(),
            visible: false,
        };
        if tx.send(hidden).is_err() {
            break;
        }
        time::sleep(FADE).await;

        index = (index + 1) % names.len();
        let shown = LabelFrame {
            text: names[index].clone(),
            visible: true,
        };
        if tx.send(shown).is_err() {
            break;
        }
    }
    debug!("label display dropped, rotation stopped");
}
