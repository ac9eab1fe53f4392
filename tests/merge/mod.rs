mod merge_combines_divergent_snapshots;
