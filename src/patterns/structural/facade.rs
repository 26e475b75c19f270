//! Facade: one simple entry point in front of several cooperating
//! subsystems.

use itertools::Itertools;
use rand::Rng;
use thiserror::Error;

use crate::config::FacadeConfig;
use crate::console;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MagicSquareError {
    #[error("no magic square found after {attempts} attempts")]
    NotFound { attempts: u32 },
}

// =============================================================================
// IDE subsystems
// =============================================================================

/// Each write starts from the last saved text.
#[derive(Debug, Default)]
pub struct TextEditor {
    saved: Vec<String>,
    current: String,
}

impl TextEditor {
    pub fn write_text(&mut self, text: &str) -> &str {
        self.current = match self.saved.last() {
            Some(last) => format!("{last}{text}"),
            None => text.to_string(),
        };
        &self.current
    }

    pub fn save_text(&mut self) -> &str {
        self.saved.push(self.current.clone());
        &self.current
    }
}

#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    pub fn compile(&self, code: &str) -> String {
        format!("compiled({code})")
    }
}

#[derive(Debug, Default)]
pub struct Runtime;

impl Runtime {
    pub fn execute(&self, binary: &str) -> String {
        format!("executed({binary})")
    }
}

#[derive(Debug, Default)]
pub struct CommandLine {
    history: Vec<String>,
}

impl CommandLine {
    pub fn output(&mut self, result: &str) -> &str {
        self.history.push(format!("output({result})"));
        self.history.last().map(String::as_str).unwrap_or_default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[derive(Debug, Default)]
pub struct IdeFacade {
    editor: TextEditor,
    compiler: Compiler,
    runtime: Runtime,
    command_line: CommandLine,
}

impl IdeFacade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write, save, compile, execute and print in one call.
    pub fn run(&mut self, code: &str) -> String {
        self.editor.write_text(code);
        let source = self.editor.save_text().to_string();
        let binary = self.compiler.compile(&source);
        let result = self.runtime.execute(&binary);
        self.command_line.output(&result).to_string()
    }

    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }
}

/// Client that only knows about the facade.
pub struct Developer<'a> {
    ide: &'a mut IdeFacade,
}

impl<'a> Developer<'a> {
    pub fn new(ide: &'a mut IdeFacade) -> Self {
        Self { ide }
    }

    pub fn create_application(&mut self, code: &str) -> String {
        self.ide.run(code)
    }
}

// =============================================================================
// Magic square subsystems
// =============================================================================

pub type Grid = Vec<Vec<u32>>;

pub struct Generator<R> {
    rng: R,
    max_value: u32,
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R, max_value: u32) -> Self {
        Self {
            rng,
            max_value: max_value.max(1),
        }
    }

    /// Values are drawn from `1..=max_value`.
    pub fn generate(&mut self, size: usize) -> Grid {
        (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| self.rng.gen_range(1..=self.max_value))
                    .collect()
            })
            .collect()
    }
}

pub struct Splitter;

impl Splitter {
    /// Rows, then columns, then both diagonals.
    pub fn split(&self, grid: &Grid) -> Vec<Vec<u32>> {
        let size = grid.len();
        let mut lines: Vec<Vec<u32>> = grid.clone();
        lines.extend((0..size).map(|col| grid.iter().map(|row| row[col]).collect()));
        lines.push((0..size).map(|i| grid[i][i]).collect());
        lines.push((0..size).map(|i| grid[i][size - 1 - i]).collect());
        lines
    }
}

pub struct Verifier;

impl Verifier {
    pub fn verify(&self, lines: &[Vec<u32>]) -> bool {
        lines
            .iter()
            .map(|line| line.iter().sum::<u32>())
            .all_equal()
    }
}

pub struct MagicSquareGenerator<R> {
    generator: Generator<R>,
    splitter: Splitter,
    verifier: Verifier,
    max_attempts: u32,
}

impl<R: Rng> MagicSquareGenerator<R> {
    pub fn new(rng: R, max_value: u32, max_attempts: u32) -> Self {
        Self {
            generator: Generator::new(rng, max_value),
            splitter: Splitter,
            verifier: Verifier,
            max_attempts,
        }
    }

    /// Returns the square and the attempt it was found on.
    pub fn generate(&mut self, size: usize) -> Result<(Grid, u32), MagicSquareError> {
        for attempt in 1..=self.max_attempts {
            let grid = self.generator.generate(size);
            if self.verifier.verify(&self.splitter.split(&grid)) {
                return Ok((grid, attempt));
            }
        }
        Err(MagicSquareError::NotFound {
            attempts: self.max_attempts,
        })
    }
}

pub fn run(config: &FacadeConfig) {
    console::demo("Facade");

    let mut ide = IdeFacade::new();
    let mut developer = Developer::new(&mut ide);
    println!("{}", developer.create_application("Hello, world!"));

    let mut magic = MagicSquareGenerator::new(
        rand::thread_rng(),
        config.magic_square_max_value,
        config.magic_square_max_attempts,
    );
    match magic.generate(config.magic_square_size) {
        Ok((grid, attempt)) => {
            println!("Magic square found on attempt {attempt}:");
            for row in grid {
                println!("{}", row.iter().join(" "));
            }
        }
        Err(err) => {
            log::warn!("{err}");
            println!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ide_pipeline() {
        let mut ide = IdeFacade::new();
        let out = Developer::new(&mut ide).create_application("Hello, world!");
        assert_eq!(out, "output(executed(compiled(Hello, world!)))");
        assert_eq!(ide.command_line().history().len(), 1);
    }

    #[test]
    fn test_editor_appends_to_saved_text() {
        let mut ide = IdeFacade::new();
        ide.run("a");
        assert_eq!(ide.run("b"), "output(executed(compiled(ab)))");
    }

    #[test]
    fn test_splitter_and_verifier() {
        let grid = vec![vec![2, 7, 6], vec![9, 5, 1], vec![4, 3, 8]];
        let lines = Splitter.split(&grid);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3], [2, 9, 4]);
        assert_eq!(lines[6], [2, 5, 8]);
        assert_eq!(lines[7], [6, 5, 4]);
        assert!(Verifier.verify(&lines));

        let broken = vec![vec![1, 2], vec![3, 4]];
        assert!(!Verifier.verify(&Splitter.split(&broken)));
    }

    #[test]
    fn test_generator_respects_bounds() {
        let mut generator = Generator::new(StdRng::seed_from_u64(7), 3);
        let grid = generator.generate(4);
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().flatten().all(|v| (1..=3).contains(v)));
    }

    #[test]
    fn test_single_value_always_magic() {
        let mut magic = MagicSquareGenerator::new(StdRng::seed_from_u64(1), 1, 1);
        let (grid, attempt) = magic.generate(3).unwrap();
        assert_eq!(attempt, 1);
        assert!(grid.iter().flatten().all(|&v| v == 1));
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut magic = MagicSquareGenerator::new(StdRng::seed_from_u64(1), 1_000, 5);
        assert_eq!(
            magic.generate(4).unwrap_err(),
            MagicSquareError::NotFound { attempts: 5 }
        );
    }
}
