use crate::cli::KeygenArgs;
use anyhow::{Context, Result};
use jwtseal::{SigningKey, generate_pkcs8};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Owner read/write only
#[cfg(unix)]
const PRIVATE_KEY_MODE: u32 = 0o600;

pub fn run(args: KeygenArgs) -> Result<()> {
    let private_path = with_extension(&args.out, "pk8");
    let public_path = with_extension(&args.out, "spki");

    // Both files are opened before anything is written so a clash leaves no half pair
    let mut private_file = open_output(&private_path, args.force, true)?;
    let mut public_file = match open_output(&public_path, args.force, false) {
        Ok(file) => file,
        Err(error) => {
            drop(private_file);
            if !args.force {
                let _ = std::fs::remove_file(&private_path);
            }
            return Err(error);
        }
    };

    let pkcs8 = generate_pkcs8(args.alg)?;
    let key = SigningKey::from_pkcs8_der(args.alg, "keygen", &pkcs8)?;
    let spki = key.verification_key().to_public_key_der();

    private_file
        .write_all(&pkcs8)
        .with_context(|| format!("failed to write {}", private_path.display()))?;
    public_file
        .write_all(&spki)
        .with_context(|| format!("failed to write {}", public_path.display()))?;

    tracing::info!(
        algorithm = %args.alg,
        private_key = %private_path.display(),
        public_key = %public_path.display(),
        "generated key pair"
    );
    Ok(())
}

fn with_extension(prefix: &Path, extension: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Create an output file, refusing to replace an existing one unless `force`
///
/// Private key files are created with mode 0600 on Unix. Existing files
/// replaced with `force` keep their current mode, so it is tightened too.
fn open_output(path: &Path, force: bool, private: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if private {
            options.mode(PRIVATE_KEY_MODE);
        }
    }

    let file = options.open(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::AlreadyExists {
            anyhow::anyhow!("{} already exists, pass --force to overwrite", path.display())
        } else {
            anyhow::Error::new(error).context(format!("failed to create {}", path.display()))
        }
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if private {
            file.set_permissions(std::fs::Permissions::from_mode(PRIVATE_KEY_MODE))
                .with_context(|| format!("failed to restrict {}", path.display()))?;
        }
    }
    #[cfg(not(unix))]
    let _ = private;

    Ok(file)
}
