use std::io::{self, Read as _};

use clap::{Parser, Subcommand, ValueEnum};

use signet::{Digest, KeyDerivation, Signer, TimestampSigner};

#[derive(Parser)]
#[command(name = "signet", about = "Tamper-evident signed tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum DigestArg {
    Sha1,
    Sha256,
    Sha512,
}

impl From<DigestArg> for Digest {
    fn from(arg: DigestArg) -> Self {
        match arg {
            DigestArg::Sha1 => Digest::Sha1,
            DigestArg::Sha256 => Digest::Sha256,
            DigestArg::Sha512 => Digest::Sha512,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DerivationArg {
    Concat,
    DjangoConcat,
    Hmac,
    None,
}

impl From<DerivationArg> for KeyDerivation {
    fn from(arg: DerivationArg) -> Self {
        match arg {
            DerivationArg::Concat => KeyDerivation::Concat,
            DerivationArg::DjangoConcat => KeyDerivation::DjangoConcat,
            DerivationArg::Hmac => KeyDerivation::Hmac,
            DerivationArg::None => KeyDerivation::None,
        }
    }
}

#[derive(clap::Args)]
struct SignerArgs {
    /// Shared secret key.
    #[arg(short, long)]
    secret: String,

    /// Purpose salt scoping the secret.
    #[arg(long)]
    salt: Option<String>,

    /// Digest for key derivation and HMAC signatures.
    #[arg(long, value_enum, default_value_t = DigestArg::Sha1)]
    digest: DigestArg,

    /// How the secret and salt combine into the signing key.
    #[arg(long, value_enum, default_value_t = DerivationArg::DjangoConcat)]
    key_derivation: DerivationArg,

    /// Embed (or expect) a creation timestamp.
    #[arg(long, default_value_t = false)]
    timed: bool,

    /// Maximum token age in seconds; 0 disables the check. Implies --timed.
    #[arg(long, default_value_t = 0)]
    max_age: u64,
}

impl SignerArgs {
    fn build(&self) -> Signer {
        let mut signer = Signer::new(self.secret.as_str())
            .with_digest(self.digest.into())
            .with_key_derivation(self.key_derivation.into());
        if let Some(salt) = &self.salt {
            signer = signer.with_salt(salt.clone());
        }
        signer
    }

    fn timed(&self) -> bool {
        self.timed || self.max_age > 0
    }
}

#[derive(Subcommand)]
enum Command {
    /// Sign a value and print the token.
    Sign {
        /// Value to sign. If omitted, reads from stdin.
        value: Option<String>,

        #[command(flatten)]
        signer: SignerArgs,
    },

    /// Verify a token and print the recovered value.
    Unsign {
        /// Token to verify. If omitted, reads from stdin.
        token: Option<String>,

        #[command(flatten)]
        signer: SignerArgs,
    },

    /// Decode a url-safe serialized token's payload WITHOUT verifying
    /// its signature, and pretty-print it as JSON.
    Inspect {
        /// Token to decode. If omitted, reads from stdin.
        token: Option<String>,

        /// Also strip a trailing timestamp segment.
        #[arg(long, default_value_t = false)]
        timed: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Sign { value, signer } => cmd_sign(value, &signer),
        Command::Unsign { token, signer } => cmd_unsign(token, &signer),
        Command::Inspect { token, timed } => cmd_inspect(token, timed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Read the argument, or stdin when absent, trimming the trailing newline.
fn read_input(arg: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match arg {
        Some(value) => Ok(value),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim_end_matches(&['\r', '\n'][..]).to_owned())
        }
    }
}

fn cmd_sign(
    value: Option<String>,
    args: &SignerArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_input(value)?;
    let signer = args.build();
    let token = if args.timed() {
        TimestampSigner::new(signer, args.max_age).sign(&value)
    } else {
        signer.sign(&value)
    };
    println!("{token}");
    Ok(())
}

fn cmd_unsign(
    token: Option<String>,
    args: &SignerArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = read_input(token)?;
    let signer = args.build();
    let value = if args.timed() {
        TimestampSigner::new(signer, args.max_age).unsign(&token)?
    } else {
        signer.unsign(&token)?
    };
    println!("{value}");
    Ok(())
}

fn cmd_inspect(
    token: Option<String>,
    timed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = read_input(token)?;

    // Strip the signature, and optionally the timestamp, from the right;
    // a leading compression marker survives because only suffixes go.
    let (mut payload, _) = token
        .rsplit_once('.')
        .ok_or("token has no signature separator")?;
    if timed {
        payload = payload
            .rsplit_once('.')
            .ok_or("token has no timestamp separator")?
            .0;
    }

    // Any signer works here: load_payload never touches the signature.
    let serializer = signet::UrlSafeSerializer::new(
        signet::JsonMarshaller,
        Signer::new(""),
    );
    let bytes = serializer.load_payload(payload)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
