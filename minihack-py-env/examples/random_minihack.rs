use anyhow::Result;
use minihack_core::{
    DefaultEvaluator, DictObs, DiscreteAct, Evaluator as _, Policy, RllibEnv, RllibEnvConfig,
};
use minihack_py_env::{FlagsFormat, PyNleEnv, PyNleEnvConfig};

type Env = RllibEnv<PyNleEnv>;

// Flags read by `minihack.agent.common.envs.tasks.create_env`, with the
// values of the MiniHack agent's default configuration.
const FLAGS: &str = r#"
env: MiniHack-Room-5x5-v0
character: mon-hum-neu-mal
obs_keys: glyphs,chars,colors,specials,blstats,message
penalty_step: -0.001
penalty_time: 0.0
fn_penalty_step: constant
max_num_steps: 100
reward_win: 1.0
reward_lose: 0.0
save_tty: false
state_counter: none
seedspath: ""
"#;

struct RandomPolicy {
    n_actions: u32,
}

impl Policy<Env> for RandomPolicy {
    fn sample(&mut self, _: &DictObs) -> DiscreteAct {
        DiscreteAct(fastrand::u32(..self.n_actions) as i64)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let config = RllibEnvConfig::new(
        PyNleEnvConfig::default()
            .flags(serde_yaml::from_str(FLAGS)?)
            .flags_format(FlagsFormat::Omegaconf),
    )
    .observation_keys(vec!["glyphs", "blstats", "message"]);
    let mut evaluator = DefaultEvaluator::<Env>::new(&config, 5)?;
    let mut policy = RandomPolicy { n_actions: 8 };

    let record = evaluator.evaluate(&mut policy)?;
    println!("Average return: {}", record.get_scalar("Episode return")?);

    evaluator.close()
}
