use js_sys::{wasm_bindgen::JsValue, Array, Uint8Array};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, CryptoKey, SubtleCrypto};

use super::server::AppError;
const SECRET_KEY: &str = env!("HMAC_KEY");

fn wasm_err(e: JsValue) -> AppError {
  AppError::Wasm(format!("{:?}", e))
}

/// Signs simulation-service requests with the shared HMAC key through WebCrypto.
pub struct AuthSignature {
  subtle: SubtleCrypto,
  algo: js_sys::Object,
  crypto_key: CryptoKey
}

impl AuthSignature {
  pub async fn new() -> Result<Self, AppError> {

    let crypto = window()
      .ok_or_else(|| AppError::Wasm("no global window".to_string()))?
      .crypto()
      .map_err(wasm_err)?;
    let subtle = crypto.subtle();

    let algo = js_sys::Object::new();
    js_sys::Reflect::set(&algo, &JsValue::from_str("name"), &JsValue::from_str("HMAC")).map_err(wasm_err)?;
    js_sys::Reflect::set(&algo, &JsValue::from_str("hash"), &JsValue::from_str("SHA-256")).map_err(wasm_err)?;

    //init and store the key
    let crypto_key = Self::init_crypto_key(&subtle, &algo).await?;

    Ok(Self { subtle, algo, crypto_key })
  }

  async fn init_crypto_key(subtle: &SubtleCrypto, algo: &js_sys::Object) -> Result<CryptoKey, AppError> {

    let key_bytes = SECRET_KEY.as_bytes();
    let key_array = Uint8Array::new_with_length(key_bytes.len() as u32);
    key_array.copy_from(key_bytes);

    let usages = Array::new();
    usages.push(&JsValue::from_str("sign"));

    let key_promise = subtle.import_key_with_object(
      "raw",
      &key_array,
      algo,
      false,
      &usages
    ).map_err(wasm_err)?;

    let c_key: CryptoKey = JsFuture::from(key_promise).await.map_err(wasm_err)?.into();

    Ok(c_key)
  }

  pub async fn sign_with_key(&self, path: &str, timestamp: u64) -> Result<String, AppError> {
    let message = format!("{}{}", path, timestamp);
    let message_bytes = message.as_bytes();

    let message_array = Uint8Array::new_with_length(message_bytes.len() as u32);
    message_array.copy_from(message_bytes);

    let sign_promise = self.subtle
      .sign_with_object_and_buffer_source(&self.algo, &self.crypto_key, &message_array)
      .map_err(wasm_err)?;

    let signature_buffer = JsFuture::from(sign_promise).await.map_err(wasm_err)?;
    let signature_array = Uint8Array::new(&signature_buffer);

    Ok(to_hex(&signature_array.to_vec()))
  }

  /// `(timestamp, signature)` for a request to `path` made now.
  pub async fn credentials(&self, path: &str) -> Result<(u64, String), AppError> {
    let timestamp = (js_sys::Date::now() / 1000.0) as u64;
    let signature = self.sign_with_key(path, timestamp).await?;
    Ok((timestamp, signature))
  }
}

fn to_hex(bytes: &[u8]) -> String {
  let mut result = String::with_capacity(bytes.len() * 2);
  for byte in bytes {
    result.push_str(&format!("{:02x}", byte));
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_is_lowercase_and_padded() {
    assert_eq!(to_hex(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
    assert_eq!(to_hex(&[]), "");
  }
}
