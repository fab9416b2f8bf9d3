use casim_lib::{
    models::{Agent, CueState},
    rules::AgentType,
    Config, CueConfig, CueInit, Error as SimError, GridInit, LifeConfig, PolyOutput,
    PopulationInit, RowInit, SchellingConfig, Seeds, State, UpdateScheme, WolframConfig, ALIVE,
};
use std::error::Error;

#[test]
fn glider() -> Result<(), Box<dyn Error>> {
    let cells = vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    let config = LifeConfig::new(8, 8).set_init(GridInit::Cells(cells.clone()));
    let mut sim = config.simulation(None, Seeds::new(0))?;
    for _ in 0..4 {
        sim.step();
    }
    let moved: Vec<_> = cells.iter().map(|&(i, j)| (i + 1, j + 1)).collect();
    let expected = LifeConfig::new(8, 8)
        .set_init(GridInit::Cells(moved))
        .simulation(None, Seeds::new(0))?;
    assert_eq!(sim.state(), expected.state());
    assert_eq!(sim.population(), 5);
    Ok(())
}

#[test]
fn glider_wraps_around() -> Result<(), Box<dyn Error>> {
    let config = LifeConfig::new(6, 6).set_init(GridInit::Plaintext(String::from(
        ".o.\n..o\nooo",
    )));
    let mut sim = config.simulation(None, Seeds::new(0))?;
    let start = sim.state().clone();
    // Period 4, moving by (1, 1): back to the start after 4 × 6 generations.
    for _ in 0..24 {
        sim.step();
    }
    assert_eq!(sim.state(), &start);
    Ok(())
}

#[test]
fn block() -> Result<(), Box<dyn Error>> {
    let config =
        LifeConfig::new(6, 6).set_init(GridInit::Cells(vec![(2, 2), (2, 3), (3, 2), (3, 3)]));
    let mut sim = config.simulation(None, Seeds::new(0))?;
    let start = sim.state().clone();
    let output = sim.run(10, true);
    let history = output.history.ok_or("no history")?;
    assert!(history.frames().iter().all(|frame| frame == &start));
    assert_eq!(output.end, start);
    Ok(())
}

#[test]
fn highlife_replicator_grows() -> Result<(), Box<dyn Error>> {
    let config = LifeConfig::new(32, 32)
        .set_rule_string("B36/S23")
        .set_init(GridInit::Plaintext(String::from(
            "..ooo\n.o..o\no...o\no..o.\nooo..",
        )));
    let mut sim = config.simulation(None, Seeds::new(0))?;
    let output = sim.run(12, false);
    assert!(output.history.is_none());
    assert!(output.end.population() > output.start.population());
    Ok(())
}

#[test]
fn rule_90_sierpinski() -> Result<(), Box<dyn Error>> {
    const N: usize = 31;
    const CENTER: usize = 15;
    let config = WolframConfig::new(N).set_rule(90).set_init(RowInit::Center);
    let mut sim = config.simulation(None, Seeds::new(0))?;
    let output = sim.run(15, true);
    let history = output.history.ok_or("no history")?;
    assert_eq!(history.shape(), (16, 1, N));

    for (t, row) in history.frames().iter().enumerate() {
        // Row t of Pascal's triangle mod 2: C(t, k) is odd iff k & t == k.
        let expected: Vec<usize> = (0..=t)
            .filter(|&k| k & t == k)
            .map(|k| CENTER + 2 * k - t)
            .collect();
        let alive: Vec<usize> = (0..N).filter(|&j| row[(0, j)] == ALIVE).collect();
        assert_eq!(alive, expected, "generation {}", t);
        assert_eq!(alive.len(), 1 << t.count_ones());
    }
    Ok(())
}

#[test]
fn schelling_conserves_agents() -> Result<(), Box<dyn Error>> {
    for &scheme in &[UpdateScheme::Sequential, UpdateScheme::Synchronous] {
        let config = Config::new(SchellingConfig::new(20, 20))
            .set_steps(20)
            .set_seed(1)
            .set_scheme(scheme);
        let output = match config.run()? {
            PolyOutput::Grid(output) => output,
            _ => return Err("not a grid".into()),
        };
        let history = output.history.ok_or("no history")?;
        assert_eq!(history.len(), 21);
        let count = |t: usize, id: u8| history.frames()[t].count_state(State(id));
        for t in 1..history.len() {
            assert_eq!(count(t, 1), count(0, 1), "{:?}, generation {}", scheme, t);
            assert_eq!(count(t, 2), count(0, 2), "{:?}, generation {}", scheme, t);
        }
        assert_ne!(output.start, output.end);
    }
    Ok(())
}

#[test]
fn schelling_without_preference_is_stable() -> Result<(), Box<dyn Error>> {
    let types = vec![AgentType::new(1, "A", 0.0, 1.0)];
    let config = SchellingConfig::new(10, 10)
        .set_agent_types(types)
        .set_init(PopulationInit::Random { voids: 0.3 });
    let mut sim = config.simulation(None, Seeds::new(5))?;
    let start = sim.state().clone();
    sim.step();
    assert_eq!(sim.state(), &start);
    Ok(())
}

#[test]
fn cue_convergence() -> Result<(), Box<dyn Error>> {
    let init = CueInit::Explicit {
        agents: vec![
            Agent {
                character: 0.0,
                position: 0,
            },
            Agent {
                character: 10.0,
                position: 1,
            },
        ],
        spaces: vec![20.0, 30.0],
    };
    let config = CueConfig::new(2, 2)
        .set_radius(1)
        .set_delta_sigma(1e9)
        .set_rates(1.0, 1.0)
        .set_init(init);
    let mut sim = config.simulation(None, Seeds::new(3))?;
    let output = sim.run(50, false);
    let CueState { agents, spaces } = &output.end;
    let values: Vec<f64> = agents
        .iter()
        .map(|a| a.character)
        .chain(spaces.iter().copied())
        .collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert!(values.iter().all(|v| (v - mean).abs() < 1e-9), "{:?}", values);
    Ok(())
}

#[test]
fn cue_history() -> Result<(), Box<dyn Error>> {
    let config = CueConfig::new(5, 20).set_radius(2);
    let mut sim = config.simulation(None, Seeds::new(8))?;
    let output = sim.run(10, true);
    let history = output.history.ok_or("no history")?;
    assert_eq!(history.len(), 11);
    assert_eq!(history.agent_characters().len(), 11 * 5);
    assert_eq!(history.agent_positions().len(), 11 * 5);
    assert_eq!(history.space_characters().len(), 11 * 20);
    assert!(history.agent_positions().iter().all(|&p| p < 20));
    assert_eq!(history.get(0), Some(&output.start));
    assert_eq!(history.get(10), Some(&output.end));
    Ok(())
}

#[test]
fn fixed_seed_is_deterministic() -> Result<(), Box<dyn Error>> {
    let configs = vec![
        Config::new(LifeConfig::new(16, 16).set_init(GridInit::Random { density: 0.3 })),
        Config::new(WolframConfig::new(40).set_init(RowInit::Random { density: 0.5 })),
        Config::new(SchellingConfig::new(16, 16)),
        Config::new(CueConfig::new(20, 20)),
    ];
    for config in configs {
        let config = config.set_steps(15).set_seed(2021);
        let first = config.run()?;
        let second = config.run()?;
        assert_eq!(first, second);
        if let (PolyOutput::Grid(a), PolyOutput::Grid(b)) = (&first, &second) {
            let a = a.history.as_ref().ok_or("no history")?;
            let b = b.history.as_ref().ok_or("no history")?;
            assert_eq!(a.to_array(), b.to_array());
        }
    }
    Ok(())
}

#[test]
fn different_seeds_differ() -> Result<(), Box<dyn Error>> {
    let config = Config::new(SchellingConfig::new(16, 16)).set_steps(5);
    let a = config.clone().set_seed(1).run()?;
    let b = config.set_seed(2).run()?;
    assert_ne!(a, b);
    Ok(())
}

#[test]
fn live_steps_match_batch_run() -> Result<(), Box<dyn Error>> {
    let config = Config::new(SchellingConfig::new(12, 12)).set_seed(77);
    let mut live = config.simulation()?;
    let mut batch = config.simulation()?;
    for _ in 0..6 {
        live.step();
    }
    batch.run(6, false);
    assert_eq!(live.generation(), 6);
    assert_eq!(live.plaintext(), batch.plaintext());
    assert_eq!(live.seed(), 77);
    Ok(())
}

#[test]
fn observer_sees_every_generation() -> Result<(), Box<dyn Error>> {
    let config = Config::new(WolframConfig::new(21)).set_seed(0);
    let mut sim = config.simulation()?;
    let mut seen = Vec::new();
    sim.run_with(5, false, |generation, text: String| {
        assert_eq!(text.trim_end().len(), 21);
        seen.push(generation);
    });
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[test]
fn configuration_errors() {
    let zero_steps = Config::default().set_steps(0);
    assert_eq!(zero_steps.simulation().err(), Some(SimError::NonPositiveError));

    let thin = Config::new(LifeConfig::new(1, 5));
    assert_eq!(
        thin.simulation().err(),
        Some(SimError::WindowTooLarge {
            radius: 1,
            rows: 1,
            cols: 5
        })
    );

    let bad_rule = Config::new(LifeConfig::default().set_rule_string("foo"));
    assert!(matches!(
        bad_rule.simulation().err(),
        Some(SimError::ParseRuleError(_))
    ));

    let intolerant = Config::new(
        SchellingConfig::default().set_agent_types(vec![AgentType::new(1, "A", 1.5, 1.0)]),
    );
    assert_eq!(
        intolerant.simulation().err(),
        Some(SimError::OutOfUnitRange {
            name: "tolerance",
            value: 1.5
        })
    );

    let sync_cue = Config::new(CueConfig::default()).set_scheme(UpdateScheme::Synchronous);
    assert_eq!(
        sync_cue.simulation().err(),
        Some(SimError::UnsupportedScheme(UpdateScheme::Synchronous))
    );

    let wide = Config::new(CueConfig::new(10, 5).set_radius(5));
    assert_eq!(
        wide.simulation().err(),
        Some(SimError::WindowTooLarge {
            radius: 5,
            rows: 1,
            cols: 5
        })
    );

    let misplaced = Config::new(CueConfig::new(1, 4).set_init(CueInit::Explicit {
        agents: vec![Agent {
            character: 0.0,
            position: 9,
        }],
        spaces: vec![0.0; 4],
    }));
    assert_eq!(
        misplaced.simulation().err(),
        Some(SimError::AgentPositionError(0))
    );
    let narrow_life = Config::new(LifeConfig::new(2, 5));
    let narrow_schelling = Config::new(SchellingConfig::new(5, 2));
    assert_eq!(
        narrow_life.simulation().err(),
        Some(SimError::WindowTooLarge {
            radius: 1,
            rows: 2,
            cols: 5
        })
    );
    assert_eq!(
        narrow_schelling.simulation().err(),
        Some(SimError::WindowTooLarge {
            radius: 1,
            rows: 5,
            cols: 2
        })
    );

    let undefined_delta = Config::new(CueConfig::new(5, 20).set_delta_sigma(f64::NAN));
    assert!(matches!(
        undefined_delta.simulation().err(),
        Some(SimError::NegativeError {
            name: "delta_sigma",
            ..
        })
    ));
    let infinite_rate = Config::new(CueConfig::new(5, 20).set_rates(f64::INFINITY, 0.1));
    assert_eq!(
        infinite_rate.simulation().err(),
        Some(SimError::NegativeError {
            name: "r_agents",
            value: f64::INFINITY
        })
    );

    let too_few_agents = Config::new(CueConfig::new(3, 4).set_init(CueInit::Explicit {
        agents: vec![Agent::default()],
        spaces: vec![0.0; 4],
    }));
    assert_eq!(
        too_few_agents.simulation().err(),
        Some(SimError::AgentCountError {
            expected: 3,
            found: 1
        })
    );
}
