//! Compute command - indices for one sample

use super::MetalArgs;
use anyhow::Result;
use hmpi::config::HmpiConfig;
use hmpi::engine::{Metal, MetalConcentrations};
use hmpi::reporters::{self, OutputFormat};
use tracing::debug;

/// Run the compute command
pub fn run(config: &HmpiConfig, args: MetalArgs, format: OutputFormat) -> Result<()> {
    let metals = args.into_concentrations();
    let unknown: Vec<&str> = metals.unrecognized_keys().collect();
    if !unknown.is_empty() {
        debug!("Ignoring unrecognized readings: {}", unknown.join(", "));
    }

    let result = config.engine().compute(&metals)?;
    print!("{}", reporters::result(&result, format)?);
    Ok(())
}

impl MetalArgs {
    /// Named flags win over `--metal` pairs with the same name
    pub fn into_concentrations(self) -> MetalConcentrations {
        let named = [
            (Metal::Lead, self.lead),
            (Metal::Mercury, self.mercury),
            (Metal::Cadmium, self.cadmium),
            (Metal::Arsenic, self.arsenic),
            (Metal::Chromium, self.chromium),
            (Metal::Copper, self.copper),
            (Metal::Zinc, self.zinc),
            (Metal::Nickel, self.nickel),
        ];

        let mut metals: MetalConcentrations = self.extra.into_iter().collect();
        for (metal, value) in named {
            if let Some(v) = value {
                metals.insert(metal.as_str(), v);
            }
        }
        metals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_concentrations() {
        let args = MetalArgs {
            lead: Some(0.02),
            zinc: Some(1.0),
            extra: vec![("lead".into(), 9.0), ("iron".into(), 0.3)],
            ..Default::default()
        };
        let metals = args.into_concentrations();
        assert_eq!(metals.concentration(Metal::Lead), 0.02);
        assert_eq!(metals.concentration(Metal::Zinc), 1.0);
        assert_eq!(metals.concentration(Metal::Mercury), 0.0);
        assert_eq!(metals.get("iron"), Some(0.3));
        assert_eq!(metals.len(), 3);
    }
}
