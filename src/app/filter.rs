use super::{App, InputMode};
use crate::catalog::SP500_COMPANIES;

impl App {
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.input_buffer.clear();
    }

    pub fn confirm_search(&mut self) {
        if !self.input_buffer.is_empty() {
            self.search_query = self.input_buffer.trim().to_uppercase();
            self.search_active = true;
            self.selected_index = 0;
        } else {
            self.clear_filter();
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn cancel_search(&mut self) {
        self.clear_filter();
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn clear_filter(&mut self) {
        if self.search_active {
            self.selected_index = 0;
        }
        self.search_query.clear();
        self.search_active = false;
    }

    /// Catalog entries matching the active search on ticker or company name.
    pub fn get_filtered_catalog(&self) -> Vec<(&'static str, &'static str)> {
        let mut items: Vec<(&'static str, &'static str)> = SP500_COMPANIES.to_vec();
        if self.search_active {
            items.retain(|(symbol, name)| {
                symbol.contains(&self.search_query) || name.to_uppercase().contains(&self.search_query)
            });
        }
        items
    }

    pub fn highlighted_ticker(&self) -> Option<&'static str> {
        self.get_filtered_catalog()
            .get(self.selected_index)
            .map(|(symbol, _)| *symbol)
    }
}
