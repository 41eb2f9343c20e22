use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Workspace — scratch working directory for one `dj` invocation
// ---------------------------------------------------------------------------

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A workspace that already has the `data/` directory the default output
    /// path points into.
    pub fn with_data_dir() -> Self {
        let ws = Self::new();
        std::fs::create_dir(ws.path().join("data")).expect("create data dir");
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub fn dj(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dj"))
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("run dj binary")
    }

    pub fn read_json(&self, name: &str) -> serde_json::Value {
        let content = std::fs::read_to_string(self.file(name)).expect("read output");
        serde_json::from_str(&content).expect("output is valid JSON")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub const SAMPLE_CSV: &str = "\
dialogue_id,question,answer
10,hello,hi
11,how are you,fine
10,bye,see you
";

pub const NEGATIVE_ID_CSV: &str = "\
dialogue_id,question,answer
-3,first,earlier
5,other,x
-3,second,later
";
