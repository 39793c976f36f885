pub struct DefaultsConfig {
    pub cutoff: f64,
    pub bin_start: f64,
    pub bin_stop: f64,
    pub bin_count: usize,
    pub plot_x_max: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cutoff: 3.0,
            bin_start: 0.0,
            bin_stop: 30.0,
            bin_count: 100,
            plot_x_max: 30.0,
        }
    }
}
