/*!

Used when the `logging` feature is off: no output anywhere, but the public API still works.

*/

use crate::log::LogConfiguration;

impl LogConfiguration {
    pub(in crate::log) fn set_config(&mut self) {
        let most_verbose = self
            .module_filters
            .values()
            .copied()
            .fold(self.global_log_level, std::cmp::max);
        log::set_max_level(most_verbose);
    }
}
