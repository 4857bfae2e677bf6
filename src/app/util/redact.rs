/// Masks a credential for diagnostics, keeping only its last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }

    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
