use teasar_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a point given as comma-separated coordinates, e.g. `1.5,2,-3`
pub fn parse_point(s: &str) -> std::result::Result<Vec<f64>, String> {
    let coords = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .ok()
                .filter(|c| c.is_finite())
                .ok_or_else(|| format!("invalid coordinate '{}'", part))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;
    if coords.is_empty() {
        return Err("point needs at least one coordinate".to_string());
    }
    Ok(coords)
}

/// Parse a non-negative finite distance
pub fn parse_distance(s: &str) -> std::result::Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(d) if d.is_finite() && d >= 0.0 => Ok(d),
        Ok(d) => Err(format!("distance must be finite and non-negative, got {}", d)),
        Err(e) => Err(e.to_string()),
    }
}
