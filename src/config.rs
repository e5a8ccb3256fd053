use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const LISTINGS_DATABASE: &str = "Listings";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub listings_database: String,
}

impl ServerConfig {
    /// Read server settings from the environment. Only `MONGODB_URI` is
    /// required.
    pub fn from_env() -> Result<Self, String> {
        let mongo_uri =
            env::var("MONGODB_URI").map_err(|_| "MONGODB_URI must be set".to_string())?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(PORT),
            mongo_uri,
            listings_database: env::var("LISTINGS_DATABASE")
                .unwrap_or_else(|_| LISTINGS_DATABASE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_requires_mongo_uri() {
        env::remove_var("MONGODB_URI");
        assert_eq!(
            ServerConfig::from_env(),
            Err("MONGODB_URI must be set".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_defaults_and_bad_port() {
        env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        env::remove_var("HOST");
        env::set_var("PORT", "not-a-port");
        env::remove_var("LISTINGS_DATABASE");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.listings_database, "Listings");

        env::remove_var("MONGODB_URI");
        env::remove_var("PORT");
    }
}
