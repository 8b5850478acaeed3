use crate::{Error, Result, config::Config, types::Credentials};

/// Reads a client id and secret from the configuration.
///
/// Each key is looked up in `apis.json` first and in the environment second.
/// Both values must be present; a missing one is fatal for the invocation.
pub fn load_credentials(
    config: &Config,
    client_id_key: &str,
    client_secret_key: &str,
) -> Result<Credentials> {
    match (config.get(client_id_key), config.get(client_secret_key)) {
        (Some(client_id), Some(client_secret)) => Ok(Credentials {
            client_id,
            client_secret,
        }),
        (id, secret) => {
            let missing: Vec<&str> = [(client_id_key, id), (client_secret_key, secret)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(key, _)| key)
                .collect();
            Err(Error::Configuration(format!(
                "{} not found in apis.json or the environment",
                missing.join(" and ")
            )))
        }
    }
}
