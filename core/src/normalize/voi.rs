use crate::dataset::multiframe::MultiframeDataset;

/// Arbitrary last-resort display range when no VOI information exists
/// anywhere in the input.
pub(crate) const FALLBACK_WINDOW_CENTER: f32 = 300.0;
pub(crate) const FALLBACK_WINDOW_WIDTH: f32 = 500.0;

/// Resolves dataset-level WindowCenter/WindowWidth, in priority order:
/// existing values, mean of the per-frame VOI LUT values, fixed fallback.
/// Both lists are equal-length and non-empty afterwards.
pub(crate) fn resolve_window_level(ds: &mut MultiframeDataset) {
    // Center and width must come in pairs.
    let common = ds.window_center.len().min(ds.window_width.len());
    ds.window_center.truncate(common);
    ds.window_width.truncate(common);

    if ds.window_center.is_empty() {
        let mut center_sum = 0.0f32;
        let mut width_sum = 0.0f32;
        let mut count = 0usize;
        for group in &ds.per_frame {
            if let Some(voi) = &group.frame_voi_lut {
                if let (Some(center), Some(width)) =
                    (voi.window_center.first(), voi.window_width.first())
                {
                    center_sum += *center;
                    width_sum += *width;
                    count += 1;
                }
            }
        }
        if count > 0 {
            ds.window_center.push(center_sum / count as f32);
            ds.window_width.push(width_sum / count as f32);
        }
    }

    if ds.window_center.is_empty() {
        ds.window_center.push(FALLBACK_WINDOW_CENTER);
        ds.window_width.push(FALLBACK_WINDOW_WIDTH);
    }
}
