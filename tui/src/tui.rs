//! Watching a simulation in the terminal.

use casim_lib::PolySimulation;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use std::{
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Paused,
    Finished,
}

/// Restores the terminal when dropped.
struct TermGuard {
    out: Stdout,
}

impl TermGuard {
    fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide, cursor::MoveTo(0, 0))?;
        Ok(TermGuard { out })
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

struct SimWindow {
    status: Status,
    steps: u64,
    guard: TermGuard,
}

impl SimWindow {
    fn new(steps: u64) -> io::Result<Self> {
        Ok(SimWindow {
            status: Status::Paused,
            steps,
            guard: TermGuard::new()?,
        })
    }

    fn bar(&mut self, row: u16, width: u16, text: &str) -> io::Result<()> {
        let text: String = text
            .chars()
            .chain(std::iter::repeat(' '))
            .take(width as usize)
            .collect();
        queue!(
            self.guard.out,
            cursor::MoveTo(0, row),
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset)
        )
    }

    fn update(&mut self, simulation: &PolySimulation) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(self.guard.out, terminal::Clear(ClearType::All))?;

        let top = format!(
            "Gen: {}/{}  Population: {}  Seed: {}",
            simulation.generation(),
            self.steps,
            simulation.population(),
            simulation.seed()
        );
        self.bar(0, width, &top)?;

        let plaintext = simulation.plaintext();
        for (i, line) in plaintext
            .lines()
            .take(height.saturating_sub(2) as usize)
            .enumerate()
        {
            let line: String = line.chars().take(width as usize).collect();
            queue!(self.guard.out, cursor::MoveTo(0, i as u16 + 1), Print(line))?;
        }

        let status = match self.status {
            Status::Running => "Running... Press [space] to pause, [q] to quit.",
            Status::Paused => "Paused. Press [space] to resume, [n] to step, [q] to quit.",
            Status::Finished => "Finished. Press [q] to quit.",
        };
        self.bar(height.saturating_sub(1), width, status)?;
        self.guard.out.flush()
    }

    fn quit(&mut self) -> io::Result<bool> {
        let (width, height) = terminal::size()?;
        self.bar(height.saturating_sub(1), width, "Are you sure to quit? [Y/n]")?;
        self.guard.out.flush()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(matches!(
                        key.code,
                        KeyCode::Char('Y') | KeyCode::Char('y') | KeyCode::Enter
                    ));
                }
            }
        }
    }

    fn step(&mut self, simulation: &mut PolySimulation) {
        if simulation.generation() < self.steps {
            simulation.step();
        }
        if simulation.generation() >= self.steps {
            debug!("Reached generation {}.", simulation.generation());
            self.status = Status::Finished;
        }
    }
}

/// Runs the simulation in the terminal, one generation per `interval`,
/// up to `steps` generations. The last state shown is printed on exit.
pub(crate) fn run_with_tui(
    mut simulation: PolySimulation,
    steps: u64,
    interval: Duration,
) -> io::Result<()> {
    let mut window = SimWindow::new(steps)?;
    window.update(&simulation)?;
    let mut last_tick = Instant::now();

    loop {
        let timeout = match window.status {
            Status::Running => interval.saturating_sub(last_tick.elapsed()),
            _ => Duration::from_secs(60),
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => match window.status {
                        Status::Running | Status::Paused => {
                            window.status = Status::Paused;
                            window.update(&simulation)?;
                            if window.quit()? {
                                break;
                            }
                            window.update(&simulation)?;
                        }
                        Status::Finished => break,
                    },
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        window.status = match window.status {
                            Status::Running => Status::Paused,
                            Status::Paused => {
                                last_tick = Instant::now();
                                Status::Running
                            }
                            Status::Finished => Status::Finished,
                        };
                        window.update(&simulation)?;
                    }
                    KeyCode::Char('n') | KeyCode::Right if window.status == Status::Paused => {
                        window.step(&mut simulation);
                        window.update(&simulation)?;
                    }
                    _ => (),
                },
                Event::Resize(_, _) => window.update(&simulation)?,
                _ => (),
            }
        } else if window.status == Status::Running {
            window.step(&mut simulation);
            window.update(&simulation)?;
            last_tick = Instant::now();
        }
    }

    drop(window);
    println!("{}", simulation.plaintext());
    Ok(())
}
