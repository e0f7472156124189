mod layered;
