//! Common test utilities for session integration tests.

use d1_console::api::MockApi;
use d1_console::session::{Flow, OutputMode, Presenter, ScriptedInput, Session, SharedBuffer};

/// Terminal width used for captured output.
pub const TEST_WIDTH: u16 = 100;

/// A session wired to a mock service and a captured output buffer.
pub struct TestConsole {
    pub session: Session<MockApi>,
    pub api: MockApi,
    pub output: SharedBuffer,
}

impl TestConsole {
    pub fn new(api: MockApi) -> Self {
        Self::with_mode(api, OutputMode::Table)
    }

    pub fn with_mode(api: MockApi, mode: OutputMode) -> Self {
        let (presenter, output) = Presenter::buffered(false, TEST_WIDTH);
        let session = Session::new(api.clone(), presenter, mode);
        Self {
            session,
            api,
            output,
        }
    }

    /// Feeds `lines` one at a time, as typed at the prompt. Confirmation
    /// answers are read from the same script. Stops at EXIT.
    pub async fn type_lines(&mut self, lines: &[&str]) -> Flow {
        let mut input = ScriptedInput::new(lines.iter().copied());
        self.drain(&mut input).await
    }

    async fn drain(&mut self, input: &mut ScriptedInput) -> Flow {
        use d1_console::session::{LineReader, ReadOutcome};

        loop {
            let prompt = self.session.prompt();
            match input.read_line(&prompt).expect("scripted read") {
                ReadOutcome::Line(line) => {
                    let flow = self
                        .session
                        .handle_line(&line, input)
                        .await
                        .expect("handle line");
                    if flow == Flow::Exit {
                        return flow;
                    }
                }
                ReadOutcome::Interrupted => self.session.interrupt(),
                ReadOutcome::Eof => return Flow::Continue,
            }
        }
    }

    /// Runs one already-terminated buffer with confirmation `answers`.
    pub async fn run(&mut self, text: &str, answers: &[&str]) -> Flow {
        let mut input = ScriptedInput::new(answers.iter().copied());
        self.session.run(text, &mut input).await.expect("run")
    }

    pub fn output(&self) -> String {
        self.output.contents()
    }
}
