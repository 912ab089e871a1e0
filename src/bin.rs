//! Command line tool around the shuffle engine.
//!
//! One command per process invocation: load inputs, run the engine, persist
//! outputs, verify, report. Exit status 0 means the proof verified; any
//! error or a failed verification exits with status 1.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, bail, Result};
use merlin::Transcript;
use p256::ProjectivePoint;
use rand::rngs::OsRng;

use grothshuffle::materials;
use grothshuffle::{Shuffler, VectorPedersenGens};

const USAGE: &str = "\
usage:
  shuffletool shuffle --pk <file> --in <file> --out <file> --proof <file>
  shuffletool prove   --pk <file> --in <file> --out <file> --perm <file> --rand <file> --proof <file>
  shuffletool verify  --pk <file> --in <file> --out <file> --proof <file>";

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(true) => println!("Verification SUCCESS"),
        Ok(false) => {
            println!("Verification FAILED");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Dispatches one command. `Ok` carries the verification outcome.
fn run(args: &[String]) -> Result<bool> {
    let command = match args.first() {
        Some(c) => c.as_str(),
        None => {
            eprintln!("{}", USAGE);
            bail!("missing command");
        }
    };
    let flags = parse_flags(&args[1..])?;
    match command {
        "shuffle" => cmd_shuffle(&flags),
        "prove" => cmd_prove(&flags),
        "verify" => cmd_verify(&flags),
        other => {
            eprintln!("{}", USAGE);
            bail!("unknown command {:?}", other);
        }
    }
}

/// Shuffle + prove in one call: the engine picks its own permutation and
/// randomness, and the run re-verifies its own proof before reporting.
fn cmd_shuffle(flags: &Flags) -> Result<bool> {
    let pk = materials::read_public_key(flags.get("pk")?)?;
    let inputs = materials::read_ciphertexts(flags.get("in")?)?;
    let shuffler = engine(pk, inputs.len());

    let mut transcript = Transcript::new(b"ShuffleProof");
    let proof = shuffler.shuffle(&inputs, &mut OsRng, &mut transcript)?;

    materials::write_ciphertexts(flags.get("out")?, &proof.outputs)?;
    materials::write_proof(flags.get("proof")?, &proof)?;

    let mut transcript = Transcript::new(b"ShuffleProof");
    Ok(shuffler.verify(&inputs, &proof, &mut transcript))
}

/// Prove with an externally supplied permutation and randomness vector.
fn cmd_prove(flags: &Flags) -> Result<bool> {
    let pk = materials::read_public_key(flags.get("pk")?)?;
    let inputs = materials::read_ciphertexts(flags.get("in")?)?;
    let outputs = materials::read_ciphertexts(flags.get("out")?)?;
    let pi = materials::read_permutation(flags.get("perm")?)?;
    let rho = materials::read_randomness(flags.get("rand")?)?;
    let shuffler = engine(pk, inputs.len());

    let mut transcript = Transcript::new(b"ShuffleProof");
    let proof = shuffler.prove(&inputs, &outputs, &pi, &rho, &mut OsRng, &mut transcript)?;

    materials::write_proof(flags.get("proof")?, &proof)?;

    let mut transcript = Transcript::new(b"ShuffleProof");
    Ok(shuffler.verify(&inputs, &proof, &mut transcript))
}

/// Standalone verification of a previously written proof; nothing is
/// re-proved.
fn cmd_verify(flags: &Flags) -> Result<bool> {
    let pk = materials::read_public_key(flags.get("pk")?)?;
    let inputs = materials::read_ciphertexts(flags.get("in")?)?;
    let outputs = materials::read_ciphertexts(flags.get("out")?)?;
    let proof = materials::read_proof(flags.get("proof")?, outputs)?;
    let shuffler = engine(pk, inputs.len());

    let mut transcript = Transcript::new(b"ShuffleProof");
    Ok(shuffler.verify(&inputs, &proof, &mut transcript))
}

/// One-time per-command engine setup: commitment key sized to the batch.
fn engine(pk: ProjectivePoint, n: usize) -> Shuffler {
    Shuffler::new(pk, VectorPedersenGens::new(n))
}

struct Flags(HashMap<String, PathBuf>);

impl Flags {
    fn get(&self, name: &str) -> Result<&Path> {
        self.0
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| anyhow!("missing required flag --{}", name))
    }
}

/// Parses `--flag value` pairs following the command word.
fn parse_flags(args: &[String]) -> Result<Flags> {
    let mut map = HashMap::new();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let name = flag
            .strip_prefix("--")
            .ok_or_else(|| anyhow!("expected a --flag, got {:?}", flag))?;
        let value = iter
            .next()
            .ok_or_else(|| anyhow!("flag --{} requires a value", name))?;
        map.insert(name.to_string(), PathBuf::from(value));
    }
    Ok(Flags(map))
}
