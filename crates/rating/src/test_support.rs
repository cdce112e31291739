//! Fake BayesElo binaries for tests that spawn processes

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Writing an executable while another thread forks can fail with
/// "text file busy"; tests that create and spawn scripts hold this lock.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

pub(crate) fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ratings table in the layout BayesElo prints for `ratings`
pub(crate) const BAYESELO_TABLE: &str = "\
ResultSet>readpgn games.pgn
3 game(s) loaded, 0 game(s) with unknown result ignored.
ResultSet>elo
ResultSet-EloRating>mm
00:00:00,00
ResultSet-EloRating>ratings
Rank Name      Elo    +    - games score oppo. draws
   1 Alpha     100   20   20    40   70%   -50   10%
   2 Beta        0   15   15    40   50%     0   20%
   3 Gamma    -100   25   25    40   30%    50   10%
ResultSet-EloRating>x
ResultSet>";

/// Write an executable `/bin/sh` script named `bayeselo` into `dir`
#[cfg(unix)]
pub(crate) fn fake_backend(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("bayeselo");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Fake backend that swallows the script and prints `output`
#[cfg(unix)]
pub(crate) fn printing_backend(dir: &Path, output: impl AsRef<[u8]>) -> PathBuf {
    let table = dir.join("table.txt");
    fs::write(&table, output).unwrap();
    fake_backend(dir, &format!("cat > /dev/null\ncat '{}'", table.display()))
}

pub(crate) fn write_pgn(dir: &Path) -> PathBuf {
    let path = dir.join("games.pgn");
    fs::write(
        &path,
        "[White \"Alpha\"]\n[Black \"Beta\"]\n[Result \"1-0\"]\n\n1. e4 e5 1-0\n",
    )
    .unwrap();
    path
}
