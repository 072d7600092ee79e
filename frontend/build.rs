use dotenvy::dotenv;

const BAKED_VARS: [(&str, &str); 5] = [
  ("API_BASE_URL", "http://localhost:8000/api"),
  ("SIM_API_URL", "http://localhost:7575"),
  ("SIM_WS_URL", "ws://localhost:7575"),
  ("HMAC_KEY", "dev-only-hmac-key-change-me"),
  ("GEOJSON_URL", "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson"),
];

fn main() {
  // Tell Cargo that if the env file changes, to rerun this build script.
  println!("cargo::rerun-if-changed=.env");

  if dotenv().is_err() {
    println!("cargo::warning=no .env file found, using development defaults for unset variables");
  }

  for (name, default) in BAKED_VARS {
    println!("cargo::rerun-if-env-changed={}", name);
    let value = match std::env::var(name) {
      Ok(v) if !v.trim().is_empty() => v,
      _ => {
        println!("cargo::warning={} not set, defaulting to {}", name, default);
        default.to_string()
      }
    };
    println!("cargo::rustc-env={}={}", name, value);
  }
}
