use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::{Digest, Sha256};
use rand::Rng;
use base64::{Engine, engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD}};

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260000;
const KEY_LENGTH: usize = 32;

/// Hash un mot de passe au format Werkzeug
/// Utilise PBKDF2-HMAC-SHA256 avec 260000 itérations et un salt de 16 bytes
pub fn hash_password(password: &str) -> Result<String, String> {
    // Générer un salt aléatoire de 16 bytes
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt);

    // Calculer le hash PBKDF2
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .expect("PBKDF2 hash generation failed");

    let salt_b64 = URL_SAFE_NO_PAD.encode(salt);
    let hash_b64 = URL_SAFE_NO_PAD.encode(key);

    // Format: pbkdf2:sha256:iterations$salt$hash
    Ok(format!("pbkdf2:sha256:{}${}${}", ITERATIONS, salt_b64, hash_b64))
}

/// Vérifie un mot de passe contre le hash stocké
/// Supporte le format Werkzeug (nouveau) et le SHA-256 hex brut que
/// l'application Python d'origine écrivait dans users.password_hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    // Ancien format Python : hashlib.sha256(password).hexdigest(), pas de '$'
    if !stored_hash.contains('$') {
        return verify_legacy_sha256(password, stored_hash);
    }

    // Parser le format: pbkdf2:sha256:iterations$salt$hash
    let parts: Vec<&str> = stored_hash.split('$').collect();
    if parts.len() != 3 {
        return Err("Invalid hash format".to_string());
    }

    let header_parts: Vec<&str> = parts[0].split(':').collect();
    if header_parts.len() != 3 || header_parts[0] != "pbkdf2" {
        return Err("Invalid header".to_string());
    }

    let iterations = header_parts[2]
        .parse::<u32>()
        .map_err(|_| "Invalid iterations".to_string())?;

    let salt = decode_base64(parts[1])?;
    let expected_hash = decode_base64(parts[2])?;

    // Recalculer avec le même salt et les mêmes itérations
    let mut computed = vec![0u8; expected_hash.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .expect("PBKDF2 hash verification failed");

    Ok(computed == expected_hash)
}

/// Vérifie un hash SHA-256 hex hérité (64 caractères)
fn verify_legacy_sha256(password: &str, stored_hash: &str) -> Result<bool, String> {
    if stored_hash.len() != 64 || !stored_hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Invalid hash format".to_string());
    }

    let computed = hex::encode(Sha256::digest(password.as_bytes()));
    Ok(computed.eq_ignore_ascii_case(stored_hash))
}

/// Décode une chaîne base64 URL-safe sans padding (notre format d'écriture),
/// avec repli sur le base64 standard paddé
fn decode_base64(input: &str) -> Result<Vec<u8>, String> {
    if let Ok(decoded) = URL_SAFE_NO_PAD.decode(input) {
        return Ok(decoded);
    }

    let padding_needed = (4 - (input.len() % 4)) % 4;
    let padded = format!("{}{}", input, "=".repeat(padding_needed));

    STANDARD
        .decode(&padded)
        .map_err(|_| "Failed to decode".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("lecture123").unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:260000$"));
        assert!(verify_password("lecture123", &hash).unwrap());
        assert!(!verify_password("lecture124", &hash).unwrap());
    }

    #[test]
    fn test_two_hashes_differ() {
        // Salt aléatoire : deux hash du même mot de passe sont différents
        let h1 = hash_password("bookworm").unwrap();
        let h2 = hash_password("bookworm").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("bookworm", &h1).unwrap());
        assert!(verify_password("bookworm", &h2).unwrap());
    }

    #[test]
    fn test_legacy_python_sha256() {
        // Hash écrit par l'ancienne application (hashlib.sha256().hexdigest())
        let legacy = hex::encode(Sha256::digest(b"motdepasse"));
        assert!(verify_password("motdepasse", &legacy).unwrap());
        assert!(!verify_password("autre", &legacy).unwrap());
    }

    #[test]
    fn test_invalid_format() {
        assert!(verify_password("x", "not-a-hash").is_err());
        assert!(verify_password("x", "a$b").is_err());
    }
}
