use anyhow::Result;

/// Символьный OID вида `MODULE::name`
pub fn is_symbolic(oid: &str) -> bool {
    oid.contains("::")
}

/// Проверяет OID из профиля и убирает ведущую точку
pub fn parse_oid(s: &str) -> Result<String> {
    let oid = s.trim();
    let oid = oid.strip_prefix('.').unwrap_or(oid);

    if oid.is_empty() {
        anyhow::bail!("Невалидный OID: пустая строка");
    }

    if is_symbolic(oid) {
        let (module, name) = oid.split_once("::").unwrap_or_default();
        if module.is_empty() || name.is_empty() {
            anyhow::bail!("Невалидный OID: {}", s);
        }
        return Ok(oid.to_owned());
    }

    let numeric = oid.split('.').all(|p| !p.is_empty() && p.parse::<u64>().is_ok());
    if !numeric {
        anyhow::bail!("Невалидный OID: {}", s);
    }

    Ok(oid.to_owned())
}
